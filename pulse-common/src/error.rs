//! Common error types for pulse

use thiserror::Error;

/// Common result type for pulse operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the provider pipeline.
///
/// Provider error shapes vary (sometimes the HTTP status carries the
/// failure, sometimes a 2xx body embeds an error object); the provider
/// clients normalize all of them into these three variants so callers only
/// ever match on this taxonomy.
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or empty credential, detected before any network call
    #[error("Configuration error: {0}")]
    Config(String),

    /// Token exchange rejected by the provider's authorization server
    #[error("Token refresh failed: {0}")]
    Auth(String),

    /// Remote call failed: non-2xx status, embedded error body, or
    /// transport failure (no status)
    #[error("API error: {message}")]
    Api {
        /// HTTP status when the failure carried one
        status: Option<u16>,
        message: String,
    },
}

impl Error {
    pub fn api(status: impl Into<Option<u16>>, message: impl Into<String>) -> Self {
        Error::Api {
            status: status.into(),
            message: message.into(),
        }
    }

    /// True for responses that should trigger the one-shot token refresh
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Api { status: Some(401), .. })
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Api {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

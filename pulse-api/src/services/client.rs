//! Resilient authenticated API client
//!
//! Wraps a [`TokenManager`] and issues bearer-authenticated GETs with a
//! one-shot refresh-and-retry budget: an unauthorized response triggers a
//! single token refresh and a single retry of the same request. Every
//! logical call gets its own budget; there is never more than one
//! refresh-and-retry cycle per call.

use pulse_common::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::token::TokenManager;

/// How a provider signals call failures
///
/// Some providers embed an error object in a 2xx body; normalizing that
/// here keeps the retry logic provider-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorShape {
    /// 2xx bodies may carry `{"error": {...}}` (music provider)
    EmbeddedObject,
    /// Failures are signaled by the HTTP status alone (fitness provider)
    StatusOnly,
}

/// Authenticated GET client with transparent token refresh
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    tokens: TokenManager,
    error_shape: ErrorShape,
}

impl ApiClient {
    pub fn new(http: reqwest::Client, tokens: TokenManager, error_shape: ErrorShape) -> Self {
        Self {
            http,
            tokens,
            error_shape,
        }
    }

    /// GET `url` and decode the response body
    ///
    /// On an unauthorized response the token is refreshed once and the
    /// request retried once; any further failure surfaces as-is.
    pub async fn get<T: DeserializeOwned>(&mut self, url: &str) -> Result<T> {
        let body = self.get_json(url).await?;
        serde_json::from_value(body)
            .map_err(|e| Error::api(None, format!("response decode failed: {e}")))
    }

    /// GET `url` with the one-shot refresh-and-retry budget
    pub async fn get_json(&mut self, url: &str) -> Result<Value> {
        let token = self.tokens.current_token().await?;

        match self.request(url, &token).await {
            Err(err) if err.is_unauthorized() => {
                tracing::debug!(url = %url, "Unauthorized response, refreshing token and retrying");
                let token = self.tokens.refresh().await?;
                self.request(url, &token).await
            }
            result => result,
        }
    }

    /// Single request attempt, normalized into the error taxonomy
    async fn request(&self, url: &str, token: &str) -> Result<Value> {
        let response = self.http.get(url).bearer_auth(token).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.is_empty() {
                status.to_string()
            } else {
                body
            };
            return Err(Error::api(status.as_u16(), message));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| Error::api(None, format!("response body decode failed: {e}")))?;

        if self.error_shape == ErrorShape::EmbeddedObject {
            if let Some(err) = embedded_error(&body) {
                return Err(err);
            }
        }

        Ok(body)
    }
}

/// Extract a provider-level error embedded in a 2xx body
fn embedded_error(body: &Value) -> Option<Error> {
    let error = body.get("error")?;
    if error.is_null() {
        return None;
    }

    if let Some(message) = error.as_str() {
        return Some(Error::api(None, message.to_string()));
    }

    let status = error
        .get("status")
        .and_then(Value::as_u64)
        .map(|s| s as u16);
    let message = error
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| error.to_string());

    Some(Error::Api { status, message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn embedded_error_object_carries_status_and_message() {
        let body = json!({"error": {"status": 401, "message": "The access token expired"}});
        let err = embedded_error(&body).unwrap();
        assert!(err.is_unauthorized());
        assert!(err.to_string().contains("The access token expired"));
    }

    #[test]
    fn embedded_error_string_is_opaque() {
        let body = json!({"error": "invalid_request"});
        let err = embedded_error(&body).unwrap();
        assert!(!err.is_unauthorized());
        assert!(err.to_string().contains("invalid_request"));
    }

    #[test]
    fn clean_body_has_no_embedded_error() {
        assert!(embedded_error(&json!({"items": []})).is_none());
        assert!(embedded_error(&json!({"error": null})).is_none());
    }
}

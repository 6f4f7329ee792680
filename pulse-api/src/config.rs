//! Configuration resolution for pulse-api
//!
//! Credentials resolve with environment → TOML priority (see
//! `pulse_common::config`) and are validated once, before any network
//! call. The credential structs are immutable for the life of the process;
//! a token refresh produces a new in-memory access token, never a
//! persisted credential update.

use pulse_common::config::{is_valid_value, load_toml_config, resolve_value, TomlConfig};
use pulse_common::{Error, Result};
use tracing::info;

use crate::services::spotify::SpotifyEndpoints;
use crate::services::strava::StravaEndpoints;

pub const DEFAULT_PORT: u16 = 5730;

/// Music provider OAuth credentials
#[derive(Debug, Clone)]
pub struct SpotifyCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

impl SpotifyCredentials {
    /// Check required fields; called before any network call
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        if !is_valid_value(&self.client_id) {
            missing.push("spotify client_id");
        }
        if !is_valid_value(&self.client_secret) {
            missing.push("spotify client_secret");
        }
        if !is_valid_value(&self.refresh_token) {
            missing.push("spotify refresh_token");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::Config(format!(
                "missing required credentials: {}",
                missing.join(", ")
            )))
        }
    }
}

/// Fitness provider OAuth credentials
///
/// Unlike the music provider, this one supplies an initial access token;
/// the refresh token is only exercised when that token is rejected.
#[derive(Debug, Clone)]
pub struct StravaCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub access_token: String,
    pub refresh_token: String,
}

impl StravaCredentials {
    /// Check required fields; called before any network call
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        if !is_valid_value(&self.client_id) {
            missing.push("strava client_id");
        }
        if !is_valid_value(&self.client_secret) {
            missing.push("strava client_secret");
        }
        if !is_valid_value(&self.access_token) {
            missing.push("strava access_token");
        }
        if !is_valid_value(&self.refresh_token) {
            missing.push("strava refresh_token");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::Config(format!(
                "missing required credentials: {}",
                missing.join(", ")
            )))
        }
    }
}

/// Resolved service settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub spotify: SpotifyCredentials,
    pub strava: StravaCredentials,
    pub spotify_endpoints: SpotifyEndpoints,
    pub strava_endpoints: StravaEndpoints,
}

impl Settings {
    /// Resolve all settings and validate the credentials
    pub fn load() -> Result<Self> {
        let file = load_toml_config()?;
        let settings = Self::from_sources(&file)?;

        settings.spotify.validate()?;
        settings.strava.validate()?;

        info!("Configuration resolved and validated");

        Ok(settings)
    }

    fn from_sources(file: &TomlConfig) -> Result<Self> {
        let port = match std::env::var("PULSE_PORT") {
            Ok(value) => value
                .parse()
                .map_err(|_| Error::Config(format!("invalid PULSE_PORT: {value}")))?,
            Err(_) => file.port.unwrap_or(DEFAULT_PORT),
        };

        let get = |env_var: &str, toml_value: Option<&str>| {
            resolve_value(env_var, toml_value).unwrap_or_default()
        };

        Ok(Self {
            port,
            spotify: SpotifyCredentials {
                client_id: get("PULSE_SPOTIFY_CLIENT_ID", file.spotify_client_id.as_deref()),
                client_secret: get(
                    "PULSE_SPOTIFY_CLIENT_SECRET",
                    file.spotify_client_secret.as_deref(),
                ),
                refresh_token: get(
                    "PULSE_SPOTIFY_REFRESH_TOKEN",
                    file.spotify_refresh_token.as_deref(),
                ),
            },
            strava: StravaCredentials {
                client_id: get("PULSE_STRAVA_CLIENT_ID", file.strava_client_id.as_deref()),
                client_secret: get(
                    "PULSE_STRAVA_CLIENT_SECRET",
                    file.strava_client_secret.as_deref(),
                ),
                access_token: get(
                    "PULSE_STRAVA_ACCESS_TOKEN",
                    file.strava_access_token.as_deref(),
                ),
                refresh_token: get(
                    "PULSE_STRAVA_REFRESH_TOKEN",
                    file.strava_refresh_token.as_deref(),
                ),
            },
            spotify_endpoints: SpotifyEndpoints::default(),
            strava_endpoints: StravaEndpoints::default(),
        })
    }
}

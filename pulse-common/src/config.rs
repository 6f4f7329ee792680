//! Configuration loading for pulse services
//!
//! Values resolve in priority order:
//! 1. Environment variable (highest priority)
//! 2. TOML config file
//!
//! The config file location is `$PULSE_CONFIG` when set, otherwise
//! `pulse/pulse.toml` under the platform config directory.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::warn;

/// Optional file-based configuration
///
/// Every field has an environment-variable counterpart which takes
/// priority (see [`resolve_value`]).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub port: Option<u16>,
    pub spotify_client_id: Option<String>,
    pub spotify_client_secret: Option<String>,
    pub spotify_refresh_token: Option<String>,
    pub strava_client_id: Option<String>,
    pub strava_client_secret: Option<String>,
    pub strava_access_token: Option<String>,
    pub strava_refresh_token: Option<String>,
}

/// Locate the config file for the platform
fn config_file_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("PULSE_CONFIG") {
        return Some(PathBuf::from(path));
    }

    dirs::config_dir().map(|d| d.join("pulse").join("pulse.toml"))
}

/// Load the TOML config file if one exists
///
/// A missing file is not an error (env-only deployments are the common
/// case); a file that exists but fails to parse is.
pub fn load_toml_config() -> Result<TomlConfig> {
    let Some(path) = config_file_path() else {
        return Ok(TomlConfig::default());
    };

    if !path.exists() {
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("read {} failed: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("parse {} failed: {}", path.display(), e)))
}

/// Resolve a single value: environment variable first, then TOML
///
/// Warns when both sources carry a value (potential misconfiguration).
pub fn resolve_value(env_var: &str, toml_value: Option<&str>) -> Option<String> {
    let env_value = std::env::var(env_var).ok().filter(|v| is_valid_value(v));
    let toml_value = toml_value.filter(|v| is_valid_value(v));

    if env_value.is_some() && toml_value.is_some() {
        warn!(
            "{} set in both environment and config file; using environment",
            env_var
        );
    }

    env_value.or_else(|| toml_value.map(str::to_string))
}

/// Validate a configuration value (non-empty, non-whitespace)
pub fn is_valid_value(value: &str) -> bool {
    !value.trim().is_empty()
}

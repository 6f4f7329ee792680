//! Settings resolution integration tests
//!
//! These mutate process environment variables, so they run serially.

use serial_test::serial;

use pulse_api::config::{Settings, DEFAULT_PORT};
use pulse_common::Error;

const ALL_VARS: [(&str, &str); 7] = [
    ("PULSE_SPOTIFY_CLIENT_ID", "sp-id"),
    ("PULSE_SPOTIFY_CLIENT_SECRET", "sp-secret"),
    ("PULSE_SPOTIFY_REFRESH_TOKEN", "sp-refresh"),
    ("PULSE_STRAVA_CLIENT_ID", "st-id"),
    ("PULSE_STRAVA_CLIENT_SECRET", "st-secret"),
    ("PULSE_STRAVA_ACCESS_TOKEN", "st-access"),
    ("PULSE_STRAVA_REFRESH_TOKEN", "st-refresh"),
];

fn set_full_env() {
    // Point the file lookup somewhere that cannot exist so only the
    // environment participates
    std::env::set_var("PULSE_CONFIG", "/nonexistent/pulse.toml");
    for (var, value) in ALL_VARS {
        std::env::set_var(var, value);
    }
}

fn clear_env() {
    std::env::remove_var("PULSE_CONFIG");
    std::env::remove_var("PULSE_PORT");
    for (var, _) in ALL_VARS {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn full_environment_loads_and_validates() {
    set_full_env();

    let settings = Settings::load().unwrap();

    assert_eq!(settings.port, DEFAULT_PORT);
    assert_eq!(settings.spotify.client_id, "sp-id");
    assert_eq!(settings.strava.access_token, "st-access");

    clear_env();
}

#[test]
#[serial]
fn missing_credential_is_config_error() {
    set_full_env();
    std::env::remove_var("PULSE_STRAVA_REFRESH_TOKEN");

    let err = Settings::load().unwrap_err();
    assert!(matches!(err, Error::Config(_)));
    assert!(err.to_string().contains("strava refresh_token"));

    clear_env();
}

#[test]
#[serial]
fn port_override_is_respected() {
    set_full_env();
    std::env::set_var("PULSE_PORT", "8099");

    let settings = Settings::load().unwrap();
    assert_eq!(settings.port, 8099);

    clear_env();
}

#[test]
#[serial]
fn invalid_port_is_config_error() {
    set_full_env();
    std::env::set_var("PULSE_PORT", "not-a-port");

    let err = Settings::load().unwrap_err();
    assert!(matches!(err, Error::Config(_)));

    clear_env();
}

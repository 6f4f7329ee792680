//! HTTP server & routing integration tests
//!
//! Exercises the router surface without touching any upstream provider:
//! health check, pre-flight handling, and method refusal.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use pulse_api::config::{Settings, SpotifyCredentials, StravaCredentials};
use pulse_api::services::spotify::SpotifyEndpoints;
use pulse_api::services::strava::StravaEndpoints;
use pulse_api::{build_router, AppState};

/// Create test app state with placeholder credentials
///
/// The routes under test never reach the upstream providers.
fn test_app_state() -> AppState {
    AppState::new(Settings {
        port: 0,
        spotify: SpotifyCredentials {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            refresh_token: "refresh".to_string(),
        },
        strava: StravaCredentials {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
        },
        spotify_endpoints: SpotifyEndpoints::default(),
        strava_endpoints: StravaEndpoints::default(),
    })
}

#[tokio::test]
async fn health_endpoint_returns_json() {
    let app = build_router(test_app_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response.headers().get("content-type");
    assert!(
        content_type.is_some()
            && content_type
                .unwrap()
                .to_str()
                .unwrap()
                .contains("application/json"),
        "/health should return JSON"
    );

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["status"], "ok");
    assert_eq!(json["module"], "pulse-api");
    assert!(json["version"].is_string());
    assert!(json["uptime_seconds"].is_u64());
}

#[tokio::test]
async fn options_preflight_returns_empty_200() {
    for path in ["/api/genres", "/api/fitness"] {
        let app = build_router(test_app_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri(path)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "{path}");

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty(), "{path} pre-flight body should be empty");
    }
}

#[tokio::test]
async fn non_get_methods_are_refused_with_json() {
    for (method, path) in [
        ("POST", "/api/genres"),
        ("DELETE", "/api/genres"),
        ("POST", "/api/fitness"),
        ("PUT", "/api/fitness"),
    ] {
        let app = build_router(test_app_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(path)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.status(),
            StatusCode::METHOD_NOT_ALLOWED,
            "{method} {path}"
        );

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Method not allowed", "{method} {path}");
    }
}

#[tokio::test]
async fn unknown_route_is_404() {
    let app = build_router(test_app_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/unknown")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

//! HTTP API handlers for pulse-api

use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;

use crate::AppState;

pub mod fitness;
pub mod genres;
pub mod health;

pub use health::health_routes;

/// Build the report routes
///
/// Each report path answers GET (the report), OPTIONS (empty pre-flight
/// 200), and refuses everything else with a JSON 405.
pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/genres",
            get(genres::genre_report)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/fitness",
            get(fitness::fitness_report)
                .options(preflight)
                .fallback(method_not_allowed),
        )
}

/// OPTIONS pre-flight: empty 200 body (CORS headers come from the layer)
async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Any method other than GET/OPTIONS
async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed" })),
    )
}

//! Error types for pulse-api

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;
use thiserror::Error;

/// API error type
///
/// Wraps a pipeline failure for translation into the HTTP error envelope.
/// Every fatal pipeline error maps to a 500; the original message is
/// preserved in the body for diagnostics.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Pipeline(#[from] pulse_common::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let ApiError::Pipeline(err) = &self;

        let error_code = match err {
            pulse_common::Error::Config(_) => "CONFIG_ERROR",
            pulse_common::Error::Auth(_) => "AUTH_ERROR",
            pulse_common::Error::Api { .. } => "UPSTREAM_ERROR",
        };

        tracing::error!(error = %err, code = error_code, "Report generation failed");

        let body = Json(json!({
            "error": error_code,
            "message": err.to_string(),
            "timestamp": Utc::now().to_rfc3339(),
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

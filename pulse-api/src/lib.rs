//! pulse-api library interface for testing
//!
//! Exposes the router, state, and pipeline modules for integration tests.

pub mod aggregate;
pub mod api;
pub mod config;
pub mod error;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::config::Settings;

/// Application state shared across handlers
///
/// Carries only immutable settings and the startup timestamp. Everything
/// per-invocation (token managers, fetched records) is constructed inside
/// the handler and dropped when the response is built, so concurrent
/// requests share no mutable state.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Arc::new(settings),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::report_routes())
        .merge(api::health_routes())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

//! pulse-api - Activity Summary Service
//!
//! Fetches recent listening and training data from the upstream providers
//! and serves compact summary reports for the dashboard:
//! - `GET /api/genres` - genre frequency over recently played tracks
//! - `GET /api/fitness` - personal records and segment placements

use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use pulse_api::config::Settings;
use pulse_api::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting pulse-api (Activity Summary) service");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Resolve and validate configuration before serving anything
    let settings =
        Settings::load().map_err(|e| anyhow::anyhow!("Failed to load configuration: {e}"))?;

    let addr = format!("127.0.0.1:{}", settings.port);

    let state = AppState::new(settings);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{addr}");
    info!("Health check: http://{addr}/health");

    axum::serve(listener, app).await?;

    Ok(())
}

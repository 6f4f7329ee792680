//! Music-listening report endpoint

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::aggregate::genres::{genre_frequency, unique_artist_ids, GenreCount};
use crate::error::ApiResult;
use crate::services::spotify::SpotifyClient;
use crate::AppState;

/// Genre-frequency snapshot of the recently-played window
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreReport {
    pub timestamp: DateTime<Utc>,
    pub total_tracks: usize,
    pub total_genres: usize,
    pub genres: Vec<GenreCount>,
    pub last_updated: String,
}

/// GET /api/genres
pub async fn genre_report(State(state): State<AppState>) -> ApiResult<Json<GenreReport>> {
    Ok(Json(build_genre_report(&state).await?))
}

/// Single linear pass: authenticate, fetch, aggregate, emit
///
/// A fresh client (and token manager) is constructed per invocation;
/// nothing survives into the next request.
pub async fn build_genre_report(state: &AppState) -> pulse_common::Result<GenreReport> {
    let mut client = SpotifyClient::with_endpoints(
        &state.settings.spotify,
        state.settings.spotify_endpoints.clone(),
    )?;

    let items = client.recently_played().await?;
    let artist_ids = unique_artist_ids(&items);
    let artists = client.artists(&artist_ids).await;

    let genres = genre_frequency(&items, &artists);

    tracing::info!(
        tracks = items.len(),
        genres = genres.len(),
        "Genre report assembled"
    );

    Ok(GenreReport {
        timestamp: Utc::now(),
        total_tracks: items.len(),
        total_genres: genres.len(),
        genres,
        last_updated: Utc::now().format("%Y-%m-%d").to_string(),
    })
}

//! Music provider client (Spotify Web API shape)
//!
//! Two traversals feed the genre report: a flat single-page fetch of the
//! recently-played window, and a batched artist lookup (the artist records
//! carry the genres). Only the most recent window is sampled; no further
//! pagination is attempted.

use pulse_common::{Error, Result};
use serde::Deserialize;
use std::time::Duration;

use super::client::{ApiClient, ErrorShape};
use super::token::{ExchangeStyle, TokenExchange, TokenManager};
use crate::config::SpotifyCredentials;

/// Provider maximum page size for the recently-played window
pub const RECENTLY_PLAYED_LIMIT: usize = 50;

/// Documented maximum ids per batched artist lookup
pub const ARTIST_BATCH_SIZE: usize = 50;

const USER_AGENT: &str = concat!("pulse/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Service endpoints, overridable for tests
#[derive(Debug, Clone)]
pub struct SpotifyEndpoints {
    pub api_base: String,
    pub accounts_base: String,
}

impl Default for SpotifyEndpoints {
    fn default() -> Self {
        Self {
            api_base: "https://api.spotify.com".to_string(),
            accounts_base: "https://accounts.spotify.com".to_string(),
        }
    }
}

/// One entry in the recently-played window
#[derive(Debug, Clone, Deserialize)]
pub struct PlayedItem {
    pub track: Track,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Track {
    pub name: String,
    pub artists: Vec<TrackArtist>,
}

/// Artist reference as embedded in a track (no genres at this level)
#[derive(Debug, Clone, Deserialize)]
pub struct TrackArtist {
    pub id: String,
    pub name: String,
}

/// Full artist record from the batched lookup
#[derive(Debug, Clone, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RecentlyPlayedPage {
    items: Vec<PlayedItem>,
}

/// The batched endpoint returns null slots for ids it cannot resolve
#[derive(Debug, Deserialize)]
struct ArtistsPage {
    artists: Vec<Option<Artist>>,
}

/// Music provider API client
#[derive(Debug)]
pub struct SpotifyClient {
    api: ApiClient,
    api_base: String,
}

impl SpotifyClient {
    pub fn new(credentials: &SpotifyCredentials) -> Result<Self> {
        Self::with_endpoints(credentials, SpotifyEndpoints::default())
    }

    /// Construct against explicit endpoints
    ///
    /// Credentials are checked here, before any network call. The music
    /// provider supplies no seed access token, so the manager refreshes on
    /// first use.
    pub fn with_endpoints(
        credentials: &SpotifyCredentials,
        endpoints: SpotifyEndpoints,
    ) -> Result<Self> {
        credentials.validate()?;

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::api(None, e.to_string()))?;

        let exchange = TokenExchange {
            token_url: format!("{}/api/token", endpoints.accounts_base),
            client_id: credentials.client_id.clone(),
            client_secret: credentials.client_secret.clone(),
            refresh_token: credentials.refresh_token.clone(),
            style: ExchangeStyle::BasicForm,
        };
        let tokens = TokenManager::new(http.clone(), exchange, None);

        Ok(Self {
            api: ApiClient::new(http, tokens, ErrorShape::EmbeddedObject),
            api_base: endpoints.api_base,
        })
    }

    /// Most recent window of played tracks (single page)
    pub async fn recently_played(&mut self) -> Result<Vec<PlayedItem>> {
        let url = format!(
            "{}/v1/me/player/recently-played?limit={}",
            self.api_base, RECENTLY_PLAYED_LIMIT
        );
        let page: RecentlyPlayedPage = self.api.get(&url).await?;

        tracing::info!(tracks = page.items.len(), "Fetched recently played tracks");

        Ok(page.items)
    }

    /// Batched artist lookup
    ///
    /// Ids are chunked at the provider batch limit and fetched
    /// sequentially. A chunk whose call fails is logged and skipped; the
    /// remaining chunks still contribute.
    pub async fn artists(&mut self, ids: &[String]) -> Vec<Artist> {
        let mut artists = Vec::with_capacity(ids.len());

        for chunk in ids.chunks(ARTIST_BATCH_SIZE) {
            let url = format!("{}/v1/artists?ids={}", self.api_base, chunk.join(","));
            match self.api.get::<ArtistsPage>(&url).await {
                Ok(page) => artists.extend(page.artists.into_iter().flatten()),
                Err(err) => {
                    tracing::warn!(
                        chunk_size = chunk.len(),
                        error = %err,
                        "Artist batch failed, skipping chunk"
                    );
                }
            }
        }

        tracing::info!(
            requested = ids.len(),
            resolved = artists.len(),
            "Fetched artist records"
        );

        artists
    }
}

//! Fitness provider client (Strava API shape)
//!
//! Three traversals feed the fitness report: the athlete profile, a flat
//! single-page fetch of recent activities, and a per-activity fan-out for
//! segment efforts. The fan-out is capped to a fixed prefix of the
//! activity list to bound outbound calls against the provider rate limit.

use chrono::{DateTime, Utc};
use pulse_common::{Error, Result};
use serde::Deserialize;
use std::time::Duration;

use super::client::{ApiClient, ErrorShape};
use super::token::{ExchangeStyle, TokenExchange, TokenManager};
use crate::config::StravaCredentials;

/// Provider page size for the recent-activity window
pub const ACTIVITY_PAGE_SIZE: usize = 30;

/// Segment efforts are fetched for at most this many recent activities
pub const SEGMENT_FETCH_LIMIT: usize = 10;

const USER_AGENT: &str = concat!("pulse/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Service endpoint, overridable for tests
#[derive(Debug, Clone)]
pub struct StravaEndpoints {
    pub base: String,
}

impl Default for StravaEndpoints {
    fn default() -> Self {
        Self {
            base: "https://www.strava.com".to_string(),
        }
    }
}

/// Authenticated athlete profile
#[derive(Debug, Clone, Deserialize)]
pub struct Athlete {
    pub id: u64,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub profile: Option<String>,
}

/// One recorded activity
#[derive(Debug, Clone, Deserialize)]
pub struct Activity {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub activity_type: String,
    pub start_date: DateTime<Utc>,
    pub distance: f64,
    pub moving_time: u64,
    pub elapsed_time: u64,
    pub total_elevation_gain: f64,
    #[serde(default)]
    pub pr_count: u32,
    #[serde(default)]
    pub achievement_count: u32,
}

/// A timed attempt over a predefined route segment
#[derive(Debug, Clone, Deserialize)]
pub struct SegmentEffort {
    pub segment: Segment,
    pub activity: ActivityRef,
    pub elapsed_time: u64,
    pub moving_time: u64,
    /// Leaderboard placement; absent when the effort did not place
    pub kom_rank: Option<u32>,
    pub start_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Segment {
    pub id: u64,
    pub name: String,
    pub distance: f64,
    pub average_grade: f64,
    pub maximum_grade: f64,
    pub elevation_high: f64,
    pub elevation_low: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActivityRef {
    pub id: u64,
}

/// Fitness provider API client
pub struct StravaClient {
    api: ApiClient,
    base: String,
}

impl StravaClient {
    pub fn new(credentials: &StravaCredentials) -> Result<Self> {
        Self::with_endpoints(credentials, StravaEndpoints::default())
    }

    /// Construct against an explicit endpoint
    ///
    /// Credentials are checked here, before any network call. The fitness
    /// provider supplies a seed access token, so no token-endpoint call is
    /// made until a request is rejected.
    pub fn with_endpoints(
        credentials: &StravaCredentials,
        endpoints: StravaEndpoints,
    ) -> Result<Self> {
        credentials.validate()?;

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::api(None, e.to_string()))?;

        let exchange = TokenExchange {
            token_url: format!("{}/oauth/token", endpoints.base),
            client_id: credentials.client_id.clone(),
            client_secret: credentials.client_secret.clone(),
            refresh_token: credentials.refresh_token.clone(),
            style: ExchangeStyle::JsonBody,
        };
        let tokens = TokenManager::new(
            http.clone(),
            exchange,
            Some(credentials.access_token.clone()),
        );

        Ok(Self {
            api: ApiClient::new(http, tokens, ErrorShape::StatusOnly),
            base: endpoints.base,
        })
    }

    /// Authenticated athlete profile
    pub async fn athlete(&mut self) -> Result<Athlete> {
        let url = format!("{}/api/v3/athlete", self.base);
        self.api.get(&url).await
    }

    /// Most recent activities (single page)
    pub async fn activities(&mut self) -> Result<Vec<Activity>> {
        let url = format!(
            "{}/api/v3/athlete/activities?per_page={}",
            self.base, ACTIVITY_PAGE_SIZE
        );
        let activities: Vec<Activity> = self.api.get(&url).await?;

        tracing::info!(count = activities.len(), "Fetched recent activities");

        Ok(activities)
    }

    /// Segment efforts for a capped prefix of the given activities
    ///
    /// One call per activity, issued sequentially. A failing call is
    /// logged and skipped; its absence does not abort the remaining items.
    pub async fn segment_efforts(&mut self, activities: &[Activity]) -> Vec<SegmentEffort> {
        let mut efforts = Vec::new();

        for activity in activities.iter().take(SEGMENT_FETCH_LIMIT) {
            let url = format!("{}/api/v3/activities/{}/segments", self.base, activity.id);
            match self.api.get::<Vec<SegmentEffort>>(&url).await {
                Ok(batch) => efforts.extend(batch),
                Err(err) => {
                    tracing::warn!(
                        activity_id = activity.id,
                        error = %err,
                        "Segment effort fetch failed, skipping activity"
                    );
                }
            }
        }

        tracing::info!(count = efforts.len(), "Fetched segment efforts");

        efforts
    }
}

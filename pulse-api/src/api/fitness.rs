//! Fitness report endpoint

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::aggregate::achievements::{
    classify_placements, personal_records, KomEntry, PersonalRecord, TopTenEntry,
};
use crate::error::ApiResult;
use crate::services::strava::{Athlete, StravaClient};
use crate::AppState;

/// Athlete profile projection for the report header
#[derive(Debug, Serialize)]
pub struct AthleteSummary {
    pub id: u64,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub profile: Option<String>,
}

impl From<Athlete> for AthleteSummary {
    fn from(athlete: Athlete) -> Self {
        Self {
            id: athlete.id,
            firstname: athlete.firstname,
            lastname: athlete.lastname,
            profile: athlete.profile,
        }
    }
}

/// Achievement snapshot of the recent activity window
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FitnessReport {
    pub athlete: AthleteSummary,
    pub personal_records: Vec<PersonalRecord>,
    pub koms: Vec<KomEntry>,
    #[serde(rename = "top10Placements")]
    pub top_ten_placements: Vec<TopTenEntry>,
    pub last_updated: DateTime<Utc>,
}

/// GET /api/fitness
pub async fn fitness_report(State(state): State<AppState>) -> ApiResult<Json<FitnessReport>> {
    Ok(Json(build_fitness_report(&state).await?))
}

/// Single linear pass: authenticate, fetch, aggregate, emit
///
/// The profile and activity fetches are fatal on failure; the per-activity
/// segment fan-out tolerates failing items, so the placement lists reflect
/// whatever subset was fetched.
pub async fn build_fitness_report(state: &AppState) -> pulse_common::Result<FitnessReport> {
    let mut client = StravaClient::with_endpoints(
        &state.settings.strava,
        state.settings.strava_endpoints.clone(),
    )?;

    let athlete = client.athlete().await?;
    let activities = client.activities().await?;
    let efforts = client.segment_efforts(&activities).await;

    let records = personal_records(&activities);
    let placements = classify_placements(&efforts);

    tracing::info!(
        personal_records = records.len(),
        koms = placements.koms.len(),
        top_ten = placements.top_ten.len(),
        "Fitness report assembled"
    );

    Ok(FitnessReport {
        athlete: athlete.into(),
        personal_records: records,
        koms: placements.koms,
        top_ten_placements: placements.top_ten,
        last_updated: Utc::now(),
    })
}

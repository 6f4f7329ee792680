//! Fitness achievement aggregation
//!
//! Pure reductions over fetched activities and segment efforts. Sort
//! orders are part of the contract: chronological lists render most
//! recent first, competitive placements render best rank first.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::services::strava::{Activity, SegmentEffort};

/// Personal-record lists are truncated to the most recent entries
pub const PERSONAL_RECORD_LIMIT: usize = 10;

/// Placements ranked above this are not reported
const TOP_PLACEMENT_CUTOFF: u32 = 10;

/// Summary of an activity that set at least one personal record
#[derive(Debug, Clone, Serialize)]
pub struct PersonalRecord {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub activity_type: String,
    pub date: DateTime<Utc>,
    pub distance: f64,
    pub moving_time: u64,
    pub elapsed_time: u64,
    pub total_elevation_gain: f64,
    pub pr_count: u32,
    pub achievement_count: u32,
}

/// A rank-1 segment placement
#[derive(Debug, Clone, Serialize)]
pub struct KomEntry {
    pub segment_id: u64,
    pub segment_name: String,
    pub activity_id: u64,
    pub elapsed_time: u64,
    pub moving_time: u64,
    pub distance: f64,
    pub average_grade: f64,
    pub maximum_grade: f64,
    pub elevation_high: f64,
    pub elevation_low: f64,
    pub start_date: DateTime<Utc>,
}

/// A top-ten (but not first-place) segment placement
#[derive(Debug, Clone, Serialize)]
pub struct TopTenEntry {
    pub segment_id: u64,
    pub segment_name: String,
    pub activity_id: u64,
    pub rank: u32,
    pub elapsed_time: u64,
    pub moving_time: u64,
    pub distance: f64,
    pub average_grade: f64,
    pub maximum_grade: f64,
    pub elevation_high: f64,
    pub elevation_low: f64,
    pub start_date: DateTime<Utc>,
}

/// Ranked efforts partitioned into first-place and top-ten placements
///
/// The two lists are disjoint; efforts without a rank or ranked below the
/// cutoff appear in neither.
#[derive(Debug, Clone, Default)]
pub struct SegmentPlacements {
    pub koms: Vec<KomEntry>,
    pub top_ten: Vec<TopTenEntry>,
}

/// Activities with a positive PR count, most recent first, truncated
pub fn personal_records(activities: &[Activity]) -> Vec<PersonalRecord> {
    let mut records: Vec<PersonalRecord> = activities
        .iter()
        .filter(|a| a.pr_count > 0)
        .map(|a| PersonalRecord {
            id: a.id,
            name: a.name.clone(),
            activity_type: a.activity_type.clone(),
            date: a.start_date,
            distance: a.distance,
            moving_time: a.moving_time,
            elapsed_time: a.elapsed_time,
            total_elevation_gain: a.total_elevation_gain,
            pr_count: a.pr_count,
            achievement_count: a.achievement_count,
        })
        .collect();

    records.sort_by(|a, b| b.date.cmp(&a.date));
    records.truncate(PERSONAL_RECORD_LIMIT);
    records
}

/// Classify ranked segment efforts
///
/// KOMs (rank 1) sort by effort date descending; top-ten placements sort
/// by rank ascending, ties broken by effort date descending.
pub fn classify_placements(efforts: &[SegmentEffort]) -> SegmentPlacements {
    let mut placements = SegmentPlacements::default();

    for effort in efforts {
        match effort.kom_rank {
            Some(1) => placements.koms.push(KomEntry {
                segment_id: effort.segment.id,
                segment_name: effort.segment.name.clone(),
                activity_id: effort.activity.id,
                elapsed_time: effort.elapsed_time,
                moving_time: effort.moving_time,
                distance: effort.segment.distance,
                average_grade: effort.segment.average_grade,
                maximum_grade: effort.segment.maximum_grade,
                elevation_high: effort.segment.elevation_high,
                elevation_low: effort.segment.elevation_low,
                start_date: effort.start_date,
            }),
            Some(rank) if rank <= TOP_PLACEMENT_CUTOFF => {
                placements.top_ten.push(TopTenEntry {
                    segment_id: effort.segment.id,
                    segment_name: effort.segment.name.clone(),
                    activity_id: effort.activity.id,
                    rank,
                    elapsed_time: effort.elapsed_time,
                    moving_time: effort.moving_time,
                    distance: effort.segment.distance,
                    average_grade: effort.segment.average_grade,
                    maximum_grade: effort.segment.maximum_grade,
                    elevation_high: effort.segment.elevation_high,
                    elevation_low: effort.segment.elevation_low,
                    start_date: effort.start_date,
                })
            }
            _ => {}
        }
    }

    placements.koms.sort_by(|a, b| b.start_date.cmp(&a.start_date));
    placements
        .top_ten
        .sort_by(|a, b| a.rank.cmp(&b.rank).then(b.start_date.cmp(&a.start_date)));

    placements
}

//! Pure aggregation over fetched provider records
//!
//! Nothing in here touches the network or holds cross-invocation state;
//! each report invocation builds a fresh set of entries.

pub mod achievements;
pub mod genres;

pub use achievements::{
    classify_placements, personal_records, KomEntry, PersonalRecord, SegmentPlacements,
    TopTenEntry,
};
pub use genres::{genre_frequency, unique_artist_ids, GenreCount};

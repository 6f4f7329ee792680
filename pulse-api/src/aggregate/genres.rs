//! Genre frequency aggregation
//!
//! Pure reductions over the fetched recently-played window; no network
//! access and no shared state.

use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::services::spotify::{Artist, PlayedItem};

/// A genre and how often it occurred in the sampled window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreCount {
    pub genre: String,
    pub count: u32,
}

/// Unique artist ids across the played window, in first-seen order
///
/// This is the candidate set for the batched artist lookup. Counting
/// itself stays per-occurrence (see [`genre_frequency`]); only the lookup
/// is deduplicated.
pub fn unique_artist_ids(items: &[PlayedItem]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();

    for item in items {
        for artist in &item.track.artists {
            if seen.insert(artist.id.clone()) {
                ids.push(artist.id.clone());
            }
        }
    }

    ids
}

/// Count genres across every (track, artist) occurrence
///
/// An artist appearing on several recent tracks contributes its genres
/// once per occurrence. Artists missing from the lookup (failed batch
/// chunk, unresolvable id) contribute nothing. Output is sorted by count
/// descending; ties keep first-encountered order, which the stable sort
/// preserves without a secondary key.
pub fn genre_frequency(items: &[PlayedItem], artists: &[Artist]) -> Vec<GenreCount> {
    let by_id: HashMap<&str, &Artist> = artists.iter().map(|a| (a.id.as_str(), a)).collect();

    let mut counts: Vec<GenreCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for item in items {
        for artist_ref in &item.track.artists {
            let Some(artist) = by_id.get(artist_ref.id.as_str()) else {
                continue;
            };
            for genre in &artist.genres {
                match index.get(genre) {
                    Some(&slot) => counts[slot].count += 1,
                    None => {
                        index.insert(genre.clone(), counts.len());
                        counts.push(GenreCount {
                            genre: genre.clone(),
                            count: 1,
                        });
                    }
                }
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

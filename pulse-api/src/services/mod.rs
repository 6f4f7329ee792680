//! Provider integrations for the summary pipeline
//!
//! Both providers share the same shape: a [`TokenManager`] owning the
//! current access token, an [`ApiClient`] adding the one-shot
//! refresh-and-retry budget, and a thin provider client on top issuing the
//! flat, batched, and fan-out fetches.

pub mod client;
pub mod spotify;
pub mod strava;
pub mod token;

pub use client::{ApiClient, ErrorShape};
pub use spotify::{Artist, PlayedItem, SpotifyClient, SpotifyEndpoints};
pub use strava::{Activity, Athlete, SegmentEffort, StravaClient, StravaEndpoints};
pub use token::{ExchangeStyle, TokenExchange, TokenManager};

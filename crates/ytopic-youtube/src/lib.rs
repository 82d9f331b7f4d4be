//! Client for the `YouTube` Data API v3.
//!
//! Covers the three calls ytopic needs: keyword search, batch video lookup by
//! id, and the regional most-popular chart.

pub mod client;
pub mod duration;
pub mod error;
pub mod types;

pub use client::{YoutubeClient, MAX_RESULTS};
pub use duration::parse_duration_secs;
pub use error::YoutubeError;
pub use types::{ContentDetails, Video, VideoSnippet, VideoStatistics};

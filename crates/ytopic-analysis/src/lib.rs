//! Keyword analysis: turns a batch of `YouTube` videos into a scored report.
//!
//! Everything in this crate is pure; fetching and caching live in the server.

pub mod bucket;
pub mod classify;
pub mod popular;
pub mod report;
pub mod score;
pub mod types;

#[cfg(test)]
mod test_support;

pub use bucket::{analyze_bucket, bucket_competition, estimate_cpm};
pub use classify::{classify_videos, Classified, SHORT_FORM_MAX_SECS};
pub use popular::topic_from_popular_video;
pub use report::{build_report, no_results_report};
pub use score::{overall_competition, revenue_score};
pub use types::{BucketAnalysis, CategoryCount, ChannelSummary, KeywordReport, MonthlyUploads};

/// Round half away from zero to `decimals` places.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

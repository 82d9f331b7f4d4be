//! Report types. These are also the cached payload format, so field names
//! are part of the stored JSON contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ytopic_core::CompetitionLevel;

/// Aggregates for one duration bucket (short-form or long-form).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketAnalysis {
    pub video_count: usize,
    pub avg_views: u64,
    pub avg_likes: u64,
    pub avg_comments: u64,
    /// `(likes + comments) / views × 100`, two decimals.
    pub engagement_rate: f64,
    /// Estimated USD per 1000 views, one decimal.
    pub estimated_cpm: f64,
    pub competition: CompetitionLevel,
    pub recommended_length: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category_id: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyUploads {
    /// `YYYY-MM`, UTC.
    pub month: String,
    pub upload_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSummary {
    pub channel_id: String,
    pub channel_title: String,
    pub video_count: usize,
    pub total_views: u64,
    pub avg_views: u64,
}

/// Full analysis for one keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordReport {
    pub keyword: String,
    /// 1.0–10.0, or exactly 0 when `no_results` is set.
    pub revenue_score: f64,
    pub competition_level: CompetitionLevel,
    pub shorts_analysis: Option<BucketAnalysis>,
    pub long_analysis: Option<BucketAnalysis>,
    #[serde(default)]
    pub no_results: bool,
    #[serde(default)]
    pub category_distribution: Vec<CategoryCount>,
    #[serde(default)]
    pub trend_data: Vec<MonthlyUploads>,
    #[serde(default)]
    pub top_channels: Vec<ChannelSummary>,
    #[serde(default)]
    pub insights: Vec<String>,
    #[serde(default)]
    pub total_videos: usize,
    pub analyzed_at: DateTime<Utc>,
}

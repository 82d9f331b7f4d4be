//! Per-bucket aggregation: averages, engagement, CPM, competition.

use ytopic_core::{CompetitionLevel, ContentType};
use ytopic_youtube::Video;

use crate::round_to;
use crate::types::BucketAnalysis;

/// Base CPM (USD) by `YouTube` category id.
const CATEGORY_BASE_CPM: &[(&str, f64)] = &[
    ("1", 8.0),   // Film & Animation
    ("10", 6.0),  // Music
    ("15", 9.0),  // Pets & Animals
    ("17", 12.0), // Sports
    ("19", 8.0),  // Travel & Events
    ("20", 15.0), // Gaming
    ("22", 10.0), // People & Blogs
    ("24", 7.0),  // Entertainment
    ("25", 18.0), // News & Politics
    ("26", 11.0), // Howto & Style
    ("27", 14.0), // Education
    ("28", 16.0), // Science & Technology
    ("29", 8.0),  // Nonprofits & Activism
];

/// Used when no video in the bucket has a known category.
const DEFAULT_BASE_CPM: f64 = 8.0;

/// Shorts monetize at roughly 60% of long-form.
const SHORT_FORM_CPM_MULTIPLIER: f64 = 0.6;

/// Average-view threshold for the competition views tier.
const SHORT_FORM_VIEWS_THRESHOLD: u64 = 100_000;
const LONG_FORM_VIEWS_THRESHOLD: u64 = 50_000;

fn base_cpm(category_id: &str) -> Option<f64> {
    CATEGORY_BASE_CPM
        .iter()
        .find(|(id, _)| *id == category_id)
        .map(|(_, cpm)| *cpm)
}

/// Mean base CPM over the known categories, scaled by content type and
/// rounded to one decimal.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn estimate_cpm<'a, I>(category_ids: I, content_type: ContentType) -> f64
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let (total, count) = category_ids
        .into_iter()
        .filter_map(|id| id.and_then(base_cpm))
        .fold((0.0_f64, 0_usize), |(sum, n), cpm| (sum + cpm, n + 1));

    let avg = if count > 0 {
        total / count as f64
    } else {
        DEFAULT_BASE_CPM
    };

    let multiplier = match content_type {
        ContentType::Short => SHORT_FORM_CPM_MULTIPLIER,
        ContentType::Long => 1.0,
    };

    round_to(avg * multiplier, 1)
}

/// Competition tier from bucket size (40%) and average views (60%).
///
/// Both inputs map to a 1–4 tier; the weighted score is kept in integer
/// tenths so tier boundaries are exact.
#[must_use]
pub fn bucket_competition(
    video_count: usize,
    avg_views: u64,
    content_type: ContentType,
) -> CompetitionLevel {
    let count_tier: u32 = match video_count {
        0..15 => 1,
        15..30 => 2,
        30..50 => 3,
        _ => 4,
    };

    let threshold = match content_type {
        ContentType::Short => SHORT_FORM_VIEWS_THRESHOLD,
        ContentType::Long => LONG_FORM_VIEWS_THRESHOLD,
    };
    let views_tier: u32 = if avg_views.saturating_mul(2) < threshold {
        1
    } else if avg_views < threshold {
        2
    } else if avg_views < threshold.saturating_mul(2) {
        3
    } else {
        4
    };

    match 4 * count_tier + 6 * views_tier {
        0..20 => CompetitionLevel::Low,
        20..30 => CompetitionLevel::Medium,
        _ => CompetitionLevel::High,
    }
}

/// Aggregate one bucket. Returns `None` for an empty bucket.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn analyze_bucket(videos: &[&Video], content_type: ContentType) -> Option<BucketAnalysis> {
    if videos.is_empty() {
        return None;
    }

    let n = videos.len() as f64;
    let total = |count: fn(&Video) -> u64| {
        videos
            .iter()
            .fold(0_u64, |acc, v| acc.saturating_add(count(v)))
    };
    let total_views = total(|v| v.statistics.view_count);
    let total_likes = total(|v| v.statistics.like_count);
    let total_comments = total(|v| v.statistics.comment_count);

    let avg = |total: u64| (total as f64 / n).round() as u64;
    let avg_views = avg(total_views);

    let engagement_rate = if total_views > 0 {
        total_likes.saturating_add(total_comments) as f64 / total_views as f64 * 100.0
    } else {
        0.0
    };

    let estimated_cpm = estimate_cpm(
        videos.iter().map(|v| v.snippet.category_id.as_deref()),
        content_type,
    );

    Some(BucketAnalysis {
        video_count: videos.len(),
        avg_views,
        avg_likes: avg(total_likes),
        avg_comments: avg(total_comments),
        engagement_rate: round_to(engagement_rate, 2),
        estimated_cpm,
        competition: bucket_competition(videos.len(), avg_views, content_type),
        recommended_length: recommended_length(content_type).to_string(),
    })
}

fn recommended_length(content_type: ContentType) -> &'static str {
    match content_type {
        ContentType::Short => "30-60초",
        ContentType::Long => "8-15분",
    }
}

//! Converts chart (`mostPopular`) videos into topic rows.
//!
//! These heuristics are per-video and simpler than the keyword
//! report: one video becomes one topic.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use ytopic_core::{CompetitionLevel, ContentType, NewTopic};
use ytopic_youtube::Video;

use crate::classify::SHORT_FORM_MAX_SECS;

const MAX_TITLE_CHARS: usize = 100;
const TRUNCATED_TITLE_CHARS: usize = 97;
const MAX_TRENDING_KEYWORDS: usize = 5;

static WORD_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s,.\-!?]+").expect("valid regex"));

/// `(category id, topic category name, CPM)`.
const CATEGORY_TABLE: &[(&str, &str, i64)] = &[
    ("1", "entertainment", 6),
    ("2", "autos", 8),
    ("10", "music", 4),
    ("15", "pets", 7),
    ("17", "sports", 5),
    ("19", "travel", 9),
    ("20", "gaming", 4),
    ("22", "people", 6),
    ("23", "comedy", 5),
    ("24", "entertainment", 5),
    ("25", "news", 8),
    ("26", "howto", 10),
    ("27", "education", 15),
    ("28", "technology", 12),
];

const DEFAULT_CATEGORY: &str = "entertainment";
const DEFAULT_CPM: i64 = 6;

fn category_entry(category_id: Option<&str>) -> (&'static str, i64) {
    category_id
        .and_then(|id| CATEGORY_TABLE.iter().find(|(key, _, _)| *key == id))
        .map_or((DEFAULT_CATEGORY, DEFAULT_CPM), |(_, name, cpm)| (*name, *cpm))
}

fn competition_for_views(views: u64) -> CompetitionLevel {
    match views {
        0..50_000 => CompetitionLevel::Low,
        50_000..200_000 => CompetitionLevel::Medium,
        _ => CompetitionLevel::High,
    }
}

/// `views/10000 × cpm/10 + likes/views × 100`, clamped to `[1, 10]`, in tenths.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn score_tenths(views: u64, likes: u64, cpm: i64) -> i64 {
    let engagement = if views > 0 {
        likes as f64 / views as f64
    } else {
        0.0
    };
    let base = (views as f64 / 10_000.0) * (cpm as f64 / 10.0);
    let score = (base + engagement * 100.0).clamp(1.0, 10.0);
    (score * 10.0).round() as i64
}

fn trending_keywords(title: &str) -> Vec<String> {
    WORD_SPLIT_RE
        .split(title)
        .filter(|word| word.chars().count() > 2)
        .take(MAX_TRENDING_KEYWORDS)
        .map(str::to_string)
        .collect()
}

fn truncate_title(title: &str) -> String {
    if title.chars().count() > MAX_TITLE_CHARS {
        let head: String = title.chars().take(TRUNCATED_TITLE_CHARS).collect();
        format!("{head}...")
    } else {
        title.to_string()
    }
}

/// Build a topic row from one chart video.
#[must_use]
pub fn topic_from_popular_video(video: &Video) -> NewTopic {
    let content_type = if video.duration_secs() <= SHORT_FORM_MAX_SECS {
        ContentType::Short
    } else {
        ContentType::Long
    };
    let (category, cpm) = category_entry(video.snippet.category_id.as_deref());
    let views = video.statistics.view_count;

    let (video_length_min, video_length_max) = match content_type {
        ContentType::Short => (30, 60),
        ContentType::Long => (600, 1800),
    };

    NewTopic {
        title: truncate_title(&video.snippet.title),
        category: category.to_string(),
        content_type,
        revenue_score: Decimal::new(score_tenths(views, video.statistics.like_count, cpm), 1),
        competition_level: competition_for_views(views),
        avg_views: i64::try_from(views).unwrap_or(i64::MAX),
        estimated_cpm: Decimal::from(cpm),
        trending_keywords: trending_keywords(&video.snippet.title),
        video_length_min,
        video_length_max,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::video;

    #[test]
    fn long_education_video_maps_to_topic() {
        let v = video("a")
            .title("How to invest, the smart way! Part 2")
            .duration("PT15M")
            .category("27")
            .views(100_000)
            .likes(1_000)
            .build();
        let topic = topic_from_popular_video(&v);

        assert_eq!(topic.category, "education");
        assert_eq!(topic.content_type, ContentType::Long);
        assert_eq!(topic.estimated_cpm, Decimal::from(15));
        // 10 × 1.5 + 1 = 16 → clamped to 10
        assert_eq!(topic.revenue_score, Decimal::new(100, 1));
        assert_eq!(topic.competition_level, CompetitionLevel::Medium);
        assert_eq!(topic.avg_views, 100_000);
        assert_eq!(topic.video_length_min, 600);
        assert_eq!(topic.video_length_max, 1800);
        assert_eq!(
            topic.trending_keywords,
            ["How", "invest", "the", "smart", "way"]
        );
    }

    #[test]
    fn short_unknown_category_uses_defaults() {
        let v = video("b")
            .title("짧은 영상")
            .duration("PT30S")
            .category("99")
            .views(20_000)
            .likes(100)
            .build();
        let topic = topic_from_popular_video(&v);

        assert_eq!(topic.category, "entertainment");
        assert_eq!(topic.content_type, ContentType::Short);
        assert_eq!(topic.estimated_cpm, Decimal::from(6));
        // 2 × 0.6 + 0.5 = 1.7
        assert_eq!(topic.revenue_score, Decimal::new(17, 1));
        assert_eq!(topic.competition_level, CompetitionLevel::Low);
        assert_eq!(topic.video_length_min, 30);
        // "짧은" has two chars and is dropped.
        assert!(topic.trending_keywords.is_empty());
    }

    #[test]
    fn zero_views_scores_minimum() {
        let v = video("c").views(0).likes(0).build();
        let topic = topic_from_popular_video(&v);
        assert_eq!(topic.revenue_score, Decimal::new(10, 1));
    }

    #[test]
    fn long_titles_are_truncated() {
        let title = "가".repeat(101);
        let v = video("d").title(&title).build();
        let topic = topic_from_popular_video(&v);
        assert_eq!(topic.title.chars().count(), 100);
        assert!(topic.title.ends_with("..."));

        let exact = "a".repeat(100);
        assert_eq!(truncate_title(&exact), exact);
    }
}

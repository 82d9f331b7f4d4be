//! Composite revenue score and overall competition level.

use ytopic_core::CompetitionLevel;

use crate::round_to;
use crate::types::BucketAnalysis;

const LONG_FORM_WEIGHT: f64 = 0.6;
const SHORT_FORM_WEIGHT: f64 = 0.4;

/// Score reported when neither bucket has videos.
const NEUTRAL_SCORE: f64 = 5.0;

pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 10.0;

#[allow(clippy::cast_precision_loss)]
fn long_form_points(bucket: &BucketAnalysis) -> f64 {
    let views = (bucket.avg_views as f64 / 50_000.0 * 2.0).min(4.0);
    let cpm = (bucket.estimated_cpm / 6.0).min(3.0);
    let engagement = (bucket.engagement_rate * 20.0).min(2.0);
    let competition = match bucket.competition {
        CompetitionLevel::Low => 1.0,
        CompetitionLevel::Medium => 0.5,
        CompetitionLevel::High | CompetitionLevel::Unknown => 0.0,
    };
    views + cpm + engagement + competition
}

#[allow(clippy::cast_precision_loss)]
fn short_form_points(bucket: &BucketAnalysis) -> f64 {
    let views = (bucket.avg_views as f64 / 100_000.0 * 2.0).min(4.0);
    let cpm = (bucket.estimated_cpm / 3.0).min(2.0);
    let engagement = (bucket.engagement_rate * 20.0).min(2.0);
    let competition = match bucket.competition {
        CompetitionLevel::Low => 2.0,
        CompetitionLevel::Medium => 1.0,
        CompetitionLevel::High | CompetitionLevel::Unknown => 0.0,
    };
    views + cpm + engagement + competition
}

/// Weighted blend of the bucket scores, one decimal, clamped to
/// `[MIN_SCORE, MAX_SCORE]`.
#[must_use]
pub fn revenue_score(shorts: Option<&BucketAnalysis>, long: Option<&BucketAnalysis>) -> f64 {
    let mut weighted = 0.0;
    let mut weights = 0.0;

    if let Some(bucket) = long {
        weighted += long_form_points(bucket) * LONG_FORM_WEIGHT;
        weights += LONG_FORM_WEIGHT;
    }
    if let Some(bucket) = shorts {
        weighted += short_form_points(bucket) * SHORT_FORM_WEIGHT;
        weights += SHORT_FORM_WEIGHT;
    }

    let raw = if weights > 0.0 {
        weighted / weights
    } else {
        NEUTRAL_SCORE
    };

    round_to(raw, 1).clamp(MIN_SCORE, MAX_SCORE)
}

/// Competition across the whole result set, by video count alone.
#[must_use]
pub fn overall_competition(total_videos: usize) -> CompetitionLevel {
    match total_videos {
        0..20 => CompetitionLevel::Low,
        20..40 => CompetitionLevel::Medium,
        _ => CompetitionLevel::High,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(avg_views: u64, cpm: f64, engagement: f64, competition: CompetitionLevel) -> BucketAnalysis {
        BucketAnalysis {
            video_count: 10,
            avg_views,
            avg_likes: 0,
            avg_comments: 0,
            engagement_rate: engagement,
            estimated_cpm: cpm,
            competition,
            recommended_length: String::new(),
        }
    }

    #[test]
    fn no_buckets_scores_neutral() {
        assert!((revenue_score(None, None) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn long_only_uses_long_points_directly() {
        // views 80k → 3.2, cpm 12 → 2, engagement 0.05 → 1, high → 0 = 6.2
        let long = bucket(80_000, 12.0, 0.05, CompetitionLevel::High);
        let score = revenue_score(None, Some(&long));
        assert!((score - 6.2).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn both_buckets_are_blended() {
        // long: 3.2 + 2 + 1 + 0 = 6.2; short: 150k → 3, cpm 4.8 → 1.6,
        // engagement 2.0 → 2, medium → 1 = 7.6
        // (6.2 * 0.6 + 7.6 * 0.4) / 1.0 = 6.76 → 6.8
        let long = bucket(80_000, 12.0, 0.05, CompetitionLevel::High);
        let short = bucket(150_000, 4.8, 2.0, CompetitionLevel::Medium);
        let score = revenue_score(Some(&short), Some(&long));
        assert!((score - 6.8).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn score_is_clamped_to_range() {
        let dead = bucket(0, 0.0, 0.0, CompetitionLevel::High);
        assert!((revenue_score(Some(&dead), Some(&dead)) - MIN_SCORE).abs() < f64::EPSILON);

        let hot = bucket(10_000_000, 100.0, 50.0, CompetitionLevel::Low);
        let score = revenue_score(Some(&hot), Some(&hot));
        assert!(score <= MAX_SCORE, "got {score}");
        assert!((score - MAX_SCORE).abs() < f64::EPSILON, "got {score}");
    }

    #[test]
    fn overall_competition_thresholds() {
        assert_eq!(overall_competition(0), CompetitionLevel::Low);
        assert_eq!(overall_competition(19), CompetitionLevel::Low);
        assert_eq!(overall_competition(20), CompetitionLevel::Medium);
        assert_eq!(overall_competition(39), CompetitionLevel::Medium);
        assert_eq!(overall_competition(40), CompetitionLevel::High);
    }
}

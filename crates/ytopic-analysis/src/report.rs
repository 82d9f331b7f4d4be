//! Assembles a [`KeywordReport`] from fetched videos.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use ytopic_core::{CompetitionLevel, ContentType};
use ytopic_youtube::Video;

use crate::bucket::analyze_bucket;
use crate::classify::classify_videos;
use crate::score::{overall_competition, revenue_score};
use crate::types::{
    BucketAnalysis, CategoryCount, ChannelSummary, KeywordReport, MonthlyUploads,
};

const TOP_CHANNELS: usize = 5;

const INSIGHT_HIGH_REVENUE: &str = "✅ 수익성이 높은 주제입니다";
const INSIGHT_LOW_REVENUE: &str = "⚠️ 수익성이 낮을 수 있습니다";
const INSIGHT_EASY_ENTRY: &str = "✅ 경쟁이 적어 진입하기 좋습니다";
const INSIGHT_CROWDED: &str = "⚠️ 경쟁이 치열한 주제입니다";
const INSIGHT_LONG_FORM_FITS: &str = "💡 롱폼 콘텐츠가 더 적합합니다";
const INSIGHT_SHORT_FORM_FITS: &str = "💡 숏폼 콘텐츠가 더 적합합니다";
const UNKNOWN_CATEGORY: &str = "unknown";

/// Report for a keyword whose search returned nothing.
#[must_use]
pub fn no_results_report(keyword: &str, now: DateTime<Utc>) -> KeywordReport {
    KeywordReport {
        keyword: keyword.to_string(),
        revenue_score: 0.0,
        competition_level: CompetitionLevel::Unknown,
        shorts_analysis: None,
        long_analysis: None,
        no_results: true,
        category_distribution: Vec::new(),
        trend_data: Vec::new(),
        top_channels: Vec::new(),
        insights: Vec::new(),
        total_videos: 0,
        analyzed_at: now,
    }
}

/// Full analysis of `videos` for `keyword`. An empty slice yields the
/// no-results report.
#[must_use]
pub fn build_report(keyword: &str, videos: &[Video], now: DateTime<Utc>) -> KeywordReport {
    if videos.is_empty() {
        return no_results_report(keyword, now);
    }

    let classified = classify_videos(videos);
    let shorts_analysis = analyze_bucket(&classified.shorts, ContentType::Short);
    let long_analysis = analyze_bucket(&classified.long_form, ContentType::Long);

    let score = revenue_score(shorts_analysis.as_ref(), long_analysis.as_ref());
    let competition_level = overall_competition(videos.len());
    let insights = insights(
        score,
        competition_level,
        shorts_analysis.as_ref(),
        long_analysis.as_ref(),
    );

    KeywordReport {
        keyword: keyword.to_string(),
        revenue_score: score,
        competition_level,
        shorts_analysis,
        long_analysis,
        no_results: false,
        category_distribution: category_distribution(videos),
        trend_data: monthly_uploads(videos),
        top_channels: top_channels(videos),
        insights,
        total_videos: videos.len(),
        analyzed_at: now,
    }
}

/// Histogram of category ids, count descending. Ties go to the lower numeric
/// id; non-numeric ids sort after numeric ones in first-seen order.
fn category_distribution(videos: &[Video]) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();
    for video in videos {
        let id = video
            .snippet
            .category_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .unwrap_or(UNKNOWN_CATEGORY);
        match counts.iter_mut().find(|c| c.category_id == id) {
            Some(entry) => entry.count += 1,
            None => counts.push(CategoryCount {
                category_id: id.to_string(),
                count: 1,
            }),
        }
    }

    counts.sort_by_key(|c| {
        let numeric = c
            .category_id
            .parse::<u64>()
            .map_or((1_u8, 0_u64), |n| (0, n));
        (Reverse(c.count), numeric)
    });
    counts
}

/// Upload counts per UTC month, ascending. Videos without a parseable
/// timestamp are skipped.
fn monthly_uploads(videos: &[Video]) -> Vec<MonthlyUploads> {
    let mut months: BTreeMap<String, usize> = BTreeMap::new();
    for published in videos.iter().filter_map(Video::published_at) {
        *months.entry(published.format("%Y-%m").to_string()).or_default() += 1;
    }
    months
        .into_iter()
        .map(|(month, upload_count)| MonthlyUploads {
            month,
            upload_count,
        })
        .collect()
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn top_channels(videos: &[Video]) -> Vec<ChannelSummary> {
    let mut order: Vec<ChannelSummary> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for video in videos {
        let channel_id = video.snippet.channel_id.as_str();
        let slot = *index.entry(channel_id).or_insert_with(|| {
            order.push(ChannelSummary {
                channel_id: channel_id.to_string(),
                channel_title: video.snippet.channel_title.clone(),
                video_count: 0,
                total_views: 0,
                avg_views: 0,
            });
            order.len() - 1
        });
        let entry = &mut order[slot];
        entry.video_count += 1;
        entry.total_views = entry.total_views.saturating_add(video.statistics.view_count);
    }

    for entry in &mut order {
        entry.avg_views = (entry.total_views as f64 / entry.video_count as f64).round() as u64;
    }

    order.sort_by_key(|c| Reverse(c.total_views));
    order.truncate(TOP_CHANNELS);
    order
}

fn insights(
    score: f64,
    competition: CompetitionLevel,
    shorts: Option<&BucketAnalysis>,
    long: Option<&BucketAnalysis>,
) -> Vec<String> {
    let mut out = Vec::new();

    if score >= 7.0 {
        out.push(INSIGHT_HIGH_REVENUE);
    } else if score < 5.0 {
        out.push(INSIGHT_LOW_REVENUE);
    }

    match competition {
        CompetitionLevel::Low => out.push(INSIGHT_EASY_ENTRY),
        CompetitionLevel::High => out.push(INSIGHT_CROWDED),
        CompetitionLevel::Medium | CompetitionLevel::Unknown => {}
    }

    // Long-form takes precedence when both buckets clear their thresholds.
    if long.is_some_and(|b| b.avg_views > 50_000) {
        out.push(INSIGHT_LONG_FORM_FITS);
    } else if shorts.is_some_and(|b| b.avg_views > 100_000) {
        out.push(INSIGHT_SHORT_FORM_FITS);
    }

    out.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::score::{MAX_SCORE, MIN_SCORE};
    use crate::test_support::video;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn empty_input_is_no_results() {
        let report = build_report("아무거나", &[], now());
        assert!(report.no_results);
        assert!(report.revenue_score.abs() < f64::EPSILON);
        assert_eq!(report.competition_level, CompetitionLevel::Unknown);
        assert!(report.shorts_analysis.is_none());
        assert!(report.long_analysis.is_none());
        assert_eq!(report.total_videos, 0);
    }

    #[test]
    fn no_results_serializes_expected_fields() {
        let json = serde_json::to_value(no_results_report("x", now())).expect("serialize");
        assert_eq!(json["no_results"], true);
        assert_eq!(json["revenue_score"], 0.0);
        assert_eq!(json["competition_level"], "unknown");
        assert!(json["shorts_analysis"].is_null());
    }

    #[test]
    fn mixed_batch_populates_both_buckets() {
        let mut videos = Vec::new();
        for i in 0..30 {
            videos.push(
                video(&format!("l{i}"))
                    .duration("PT12M")
                    .views(80_000)
                    .likes(2_000)
                    .comments(100)
                    .category("27")
                    .published("2025-05-10T00:00:00Z")
                    .build(),
            );
        }
        for i in 0..20 {
            videos.push(
                video(&format!("s{i}"))
                    .duration("PT45S")
                    .views(150_000)
                    .likes(6_000)
                    .comments(300)
                    .category("24")
                    .published("2025-04-02T00:00:00Z")
                    .build(),
            );
        }

        let report = build_report("재테크", &videos, now());

        let long = report.long_analysis.as_ref().expect("long bucket");
        let short = report.shorts_analysis.as_ref().expect("short bucket");
        assert_eq!(long.video_count, 30);
        assert_eq!(long.avg_views, 80_000);
        assert_eq!(long.competition, CompetitionLevel::High);
        assert_eq!(short.video_count, 20);
        assert_eq!(short.avg_views, 150_000);
        assert_eq!(short.competition, CompetitionLevel::Medium);
        assert!((short.estimated_cpm - 4.2).abs() < 1e-9);

        assert!(report.revenue_score >= MIN_SCORE && report.revenue_score <= MAX_SCORE);
        assert_eq!(report.competition_level, CompetitionLevel::High);
        assert_eq!(report.total_videos, 50);
        assert!(!report.no_results);

        assert_eq!(
            report.trend_data,
            vec![
                MonthlyUploads { month: "2025-04".into(), upload_count: 20 },
                MonthlyUploads { month: "2025-05".into(), upload_count: 30 },
            ]
        );
        assert_eq!(report.category_distribution[0].category_id, "27");
        assert!(report
            .insights
            .iter()
            .any(|i| i == INSIGHT_LONG_FORM_FITS));
    }

    #[test]
    fn category_ties_break_by_numeric_id_then_first_seen() {
        let videos = vec![
            video("a").category("28").build(),
            video("b").build(),
            video("c").category("10").build(),
            video("d").category("x").build(),
            video("e").category("2").build(),
            video("f").category("2").build(),
        ];
        let ids: Vec<String> = category_distribution(&videos)
            .into_iter()
            .map(|c| c.category_id)
            .collect();
        assert_eq!(ids, ["2", "10", "28", "unknown", "x"]);
    }

    #[test]
    fn trend_skips_unparseable_timestamps() {
        let videos = vec![
            video("a").published("2024-12-31T23:30:00-02:00").build(),
            video("b").published("yesterday").build(),
            video("c").build(),
        ];
        let trend = monthly_uploads(&videos);
        assert_eq!(trend.len(), 1);
        // 23:30 at -02:00 is already January in UTC.
        assert_eq!(trend[0].month, "2025-01");
    }

    #[test]
    fn top_channels_sorted_by_total_views_and_capped() {
        let mut videos = Vec::new();
        for (i, views) in [10_u64, 60, 30, 50, 20, 40].iter().enumerate() {
            let id = format!("UC{i}");
            videos.push(video("v").channel(&id, &id).views(*views).build());
        }
        videos.push(video("extra").channel("UC2", "UC2").views(31).build());

        let top = top_channels(&videos);
        assert_eq!(top.len(), 5);
        let ids: Vec<&str> = top.iter().map(|c| c.channel_id.as_str()).collect();
        assert_eq!(ids, ["UC2", "UC1", "UC3", "UC5", "UC4"]);
        assert_eq!(top[0].video_count, 2);
        assert_eq!(top[0].total_views, 61);
        assert_eq!(top[0].avg_views, 31); // 30.5 rounds up
    }

    #[test]
    fn top_channel_totals_saturate() {
        let videos = vec![
            video("a").channel("UC1", "big").views(u64::MAX).build(),
            video("b").channel("UC1", "big").views(10).build(),
            video("c").channel("UC2", "small").views(5).build(),
        ];
        let top = top_channels(&videos);
        assert_eq!(top[0].channel_id, "UC1");
        assert_eq!(top[0].total_views, u64::MAX);
        assert_eq!(top[1].total_views, 5);
    }

    #[test]
    fn extreme_view_counts_still_produce_a_report() {
        let videos = vec![
            video("a").duration("PT10M").views(u64::MAX).likes(u64::MAX).build(),
            video("b").duration("PT10M").views(u64::MAX).comments(u64::MAX).build(),
        ];
        let report = build_report("kw", &videos, now());
        assert!(report.long_analysis.is_some());
        assert!(report.revenue_score >= MIN_SCORE && report.revenue_score <= MAX_SCORE);
    }

    fn bucket_with_views(avg_views: u64) -> BucketAnalysis {
        BucketAnalysis {
            video_count: 10,
            avg_views,
            avg_likes: 0,
            avg_comments: 0,
            engagement_rate: 0.0,
            estimated_cpm: 0.0,
            competition: CompetitionLevel::Medium,
            recommended_length: String::new(),
        }
    }

    #[test]
    fn insights_follow_score_and_competition() {
        let few = vec![video("a").duration("PT5S").views(10).build()];
        let report = build_report("kw", &few, now());
        assert!(report.revenue_score < 5.0);
        assert_eq!(report.insights, [INSIGHT_LOW_REVENUE, INSIGHT_EASY_ENTRY]);
    }

    #[test]
    fn high_score_and_crowded_field() {
        let out = insights(7.0, CompetitionLevel::High, None, None);
        assert_eq!(out, [INSIGHT_HIGH_REVENUE, INSIGHT_CROWDED]);
    }

    #[test]
    fn middling_score_and_medium_competition_add_nothing() {
        assert!(insights(6.9, CompetitionLevel::Medium, None, None).is_empty());
        assert!(insights(5.0, CompetitionLevel::Unknown, None, None).is_empty());
    }

    #[test]
    fn short_form_fits_when_long_form_is_quiet() {
        let shorts = bucket_with_views(100_001);
        let long = bucket_with_views(50_000);
        let out = insights(6.0, CompetitionLevel::Medium, Some(&shorts), Some(&long));
        assert_eq!(out, [INSIGHT_SHORT_FORM_FITS]);

        let out = insights(6.0, CompetitionLevel::Medium, Some(&shorts), None);
        assert_eq!(out, [INSIGHT_SHORT_FORM_FITS]);
    }

    #[test]
    fn long_form_wins_over_short_form() {
        let shorts = bucket_with_views(500_000);
        let long = bucket_with_views(50_001);
        let out = insights(6.0, CompetitionLevel::Medium, Some(&shorts), Some(&long));
        assert_eq!(out, [INSIGHT_LONG_FORM_FITS]);
    }

    #[test]
    fn form_thresholds_are_strict() {
        let shorts = bucket_with_views(100_000);
        let long = bucket_with_views(50_000);
        assert!(insights(6.0, CompetitionLevel::Medium, Some(&shorts), Some(&long)).is_empty());
    }
}

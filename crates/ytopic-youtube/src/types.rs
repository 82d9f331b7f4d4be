//! `YouTube` Data API response types.
//!
//! Only the fields ytopic reads are modelled; everything else in the payload
//! is ignored. Statistics arrive as decimal strings (`"viewCount": "1234"`)
//! and are decoded into integers, with absent counters treated as zero.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::duration::parse_duration_secs;

// ---------------------------------------------------------------------------
// search
// ---------------------------------------------------------------------------

/// Envelope for `GET /search`.
#[derive(Debug, Deserialize)]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResult {
    pub id: SearchResultId,
}

/// `id` object of a search hit. `videoId` is absent for channel and playlist
/// hits.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultId {
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub video_id: Option<String>,
}

// ---------------------------------------------------------------------------
// videos
// ---------------------------------------------------------------------------

/// Envelope for `GET /videos`.
#[derive(Debug, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<Video>,
}

/// A video resource with `snippet`, `statistics` and `contentDetails` parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    #[serde(default)]
    pub snippet: VideoSnippet,
    #[serde(default)]
    pub statistics: VideoStatistics,
    #[serde(default)]
    pub content_details: ContentDetails,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub channel_id: String,
    #[serde(default)]
    pub channel_title: String,
    #[serde(default)]
    pub category_id: Option<String>,
    /// RFC 3339 timestamp, kept raw so one malformed value does not fail the
    /// whole batch.
    #[serde(default)]
    pub published_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatistics {
    #[serde(default, deserialize_with = "count_from_str_or_number")]
    pub view_count: u64,
    #[serde(default, deserialize_with = "count_from_str_or_number")]
    pub like_count: u64,
    #[serde(default, deserialize_with = "count_from_str_or_number")]
    pub comment_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDetails {
    /// ISO-8601 duration such as `PT4M13S`.
    #[serde(default)]
    pub duration: String,
}

impl Video {
    /// Total duration in seconds; `0` when the duration is absent or malformed.
    #[must_use]
    pub fn duration_secs(&self) -> u64 {
        parse_duration_secs(&self.content_details.duration)
    }

    /// Parsed upload timestamp, if present and well-formed.
    #[must_use]
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.snippet
            .published_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCount {
    Text(String),
    Number(u64),
}

/// Accepts `"123"`, `123`, or `null`. Unparseable strings decode as zero.
fn count_from_str_or_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawCount>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawCount::Number(n)) => n,
        Some(RawCount::Text(s)) => s.trim().parse().unwrap_or(0),
        None => 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statistics_accept_strings_numbers_and_missing() {
        let stats: VideoStatistics = serde_json::from_value(serde_json::json!({
            "viewCount": "1500",
            "likeCount": 42
        }))
        .expect("parse statistics");
        assert_eq!(stats.view_count, 1500);
        assert_eq!(stats.like_count, 42);
        assert_eq!(stats.comment_count, 0);
    }

    #[test]
    fn garbage_count_decodes_as_zero() {
        let stats: VideoStatistics =
            serde_json::from_value(serde_json::json!({ "viewCount": "n/a" })).expect("parse");
        assert_eq!(stats.view_count, 0);
    }

    #[test]
    fn video_with_missing_parts_still_parses() {
        let video: Video =
            serde_json::from_value(serde_json::json!({ "id": "abc" })).expect("parse video");
        assert_eq!(video.id, "abc");
        assert_eq!(video.duration_secs(), 0);
        assert!(video.published_at().is_none());
        assert!(video.snippet.category_id.is_none());
    }

    #[test]
    fn published_at_parses_rfc3339() {
        let video: Video = serde_json::from_value(serde_json::json!({
            "id": "abc",
            "snippet": { "publishedAt": "2025-03-14T09:26:53Z" },
            "contentDetails": { "duration": "PT1M30S" }
        }))
        .expect("parse video");
        let published = video.published_at().expect("timestamp");
        assert_eq!(published.to_rfc3339(), "2025-03-14T09:26:53+00:00");
        assert_eq!(video.duration_secs(), 90);
    }

    #[test]
    fn search_hit_without_video_id_is_tolerated() {
        let resp: SearchListResponse = serde_json::from_value(serde_json::json!({
            "items": [
                { "id": { "kind": "youtube#video", "videoId": "v1" } },
                { "id": { "kind": "youtube#channel", "channelId": "c1" } }
            ]
        }))
        .expect("parse search");
        assert_eq!(resp.items.len(), 2);
        assert_eq!(resp.items[0].id.video_id.as_deref(), Some("v1"));
        assert!(resp.items[1].id.video_id.is_none());
    }
}

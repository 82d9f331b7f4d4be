//! Keyword search: validate, screen, serve from cache or fetch and analyze,
//! then persist.

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use ytopic_analysis::{build_report, no_results_report, KeywordReport};
use ytopic_core::{check_keyword, BlockedKeyword, KeywordCheck, KeywordRejection};
use ytopic_db::{DbError, KeywordStore, NewKeywordSearch};
use ytopic_youtube::{YoutubeClient, YoutubeError};

/// How long a fresh analysis stays servable from the cache.
const CACHE_TTL_HOURS: i64 = 24;

/// How far back the upstream search looks.
const SEARCH_WINDOW_DAYS: i64 = 365;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Rejected(#[from] KeywordRejection),
    #[error("keyword '{keyword}' is blocked")]
    Blocked {
        keyword: String,
        rule: &'static BlockedKeyword,
    },
    #[error("YouTube API key is not configured")]
    NotConfigured,
    #[error(transparent)]
    Upstream(#[from] YoutubeError),
    #[error(transparent)]
    Store(#[from] DbError),
    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A report plus where it came from.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub report: KeywordReport,
    pub cached: bool,
    pub cache_expires_at: DateTime<Utc>,
}

/// Run one keyword search.
///
/// Rejected and blocked keywords never reach the store or the API. Cache
/// hits bump the search counter and skip the API. Misses fetch, analyze,
/// store the report with a 24h expiry, then bump the counter.
///
/// # Errors
///
/// See [`SearchError`].
pub async fn search_keyword(
    store: &dyn KeywordStore,
    youtube: Option<&YoutubeClient>,
    raw_keyword: &str,
    ip_address: &str,
    now: DateTime<Utc>,
) -> Result<SearchOutcome, SearchError> {
    let keyword = match check_keyword(raw_keyword)? {
        KeywordCheck::Allowed(keyword) => keyword,
        KeywordCheck::Blocked { keyword, rule } => {
            tracing::info!(
                keyword,
                category = %rule.category,
                "keyword search blocked"
            );
            return Err(SearchError::Blocked {
                keyword: keyword.to_string(),
                rule,
            });
        }
    };

    if let Some(outcome) = cached_report(store, keyword, now).await? {
        store.increment_search_count(keyword, ip_address, now).await?;
        tracing::debug!(keyword, "keyword search served from cache");
        return Ok(outcome);
    }

    let youtube = youtube.ok_or(SearchError::NotConfigured)?;
    let report = analyze(youtube, keyword, now).await?;

    let payload = serde_json::to_value(&report)?;
    let cache_expires_at = now + Duration::hours(CACHE_TTL_HOURS);
    store
        .insert_keyword_search(&NewKeywordSearch {
            keyword,
            ip_address,
            result_data: &payload,
            cache_expires_at,
        })
        .await?;
    store.increment_search_count(keyword, ip_address, now).await?;

    tracing::info!(
        keyword,
        total_videos = report.total_videos,
        revenue_score = report.revenue_score,
        "keyword analyzed"
    );

    Ok(SearchOutcome {
        report,
        cached: false,
        cache_expires_at,
    })
}

/// Look up a servable cache entry. A payload that no longer decodes is
/// logged and treated as a miss.
async fn cached_report(
    store: &dyn KeywordStore,
    keyword: &str,
    now: DateTime<Utc>,
) -> Result<Option<SearchOutcome>, DbError> {
    let Some(row) = store.find_cached_search(keyword, now).await? else {
        return Ok(None);
    };
    let Some(payload) = row.result_data else {
        return Ok(None);
    };

    match serde_json::from_value::<KeywordReport>(payload) {
        Ok(report) => Ok(Some(SearchOutcome {
            report,
            cached: true,
            cache_expires_at: row.cache_expires_at,
        })),
        Err(e) => {
            tracing::warn!(keyword, row_id = row.id, error = %e, "cached report failed to decode");
            Ok(None)
        }
    }
}

async fn analyze(
    youtube: &YoutubeClient,
    keyword: &str,
    now: DateTime<Utc>,
) -> Result<KeywordReport, YoutubeError> {
    let published_after = now - Duration::days(SEARCH_WINDOW_DAYS);
    let ids = youtube.search_video_ids(keyword, published_after).await?;
    if ids.is_empty() {
        return Ok(no_results_report(keyword, now));
    }

    let videos = youtube.list_videos(&ids).await?;
    Ok(build_report(keyword, &videos, now))
}

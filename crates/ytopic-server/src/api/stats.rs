use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use ytopic_db::DbError;

use crate::middleware::RequestId;

use super::{ApiResponse, AppState, ResponseMeta};

/// Reported when there are no topics yet.
const DEFAULT_ACCURACY_RATE: i64 = 98;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub(super) struct SiteStats {
    total_topics: i64,
    total_categories: i64,
    accuracy_rate: i64,
    last_updated: DateTime<Utc>,
    status: &'static str,
}

impl SiteStats {
    fn fallback(now: DateTime<Utc>) -> Self {
        Self {
            total_topics: 150,
            total_categories: 15,
            accuracy_rate: DEFAULT_ACCURACY_RATE,
            last_updated: now,
            status: "fallback",
        }
    }
}

/// Share of topics scoring 7 or more, as a rounded percentage.
fn accuracy_rate(high_score_topics: i64, total_topics: i64) -> i64 {
    if total_topics <= 0 {
        return DEFAULT_ACCURACY_RATE;
    }
    // Half-up integer rounding of high * 100 / total.
    (high_score_topics * 200 + total_topics) / (total_topics * 2)
}

async fn load_stats(state: &AppState, now: DateTime<Utc>) -> Result<SiteStats, DbError> {
    let topic_stats = state.topics.topic_stats().await?;
    let total_categories = state.topics.count_categories().await?;

    Ok(SiteStats {
        total_topics: topic_stats.total_topics,
        total_categories,
        accuracy_rate: accuracy_rate(topic_stats.high_score_topics, topic_stats.total_topics),
        last_updated: topic_stats.last_updated.unwrap_or(now),
        status: "active",
    })
}

/// A store failure still carries a body: the fallback figures, under a 500.
pub(super) async fn site_stats(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> (StatusCode, Json<ApiResponse<SiteStats>>) {
    let now = Utc::now();
    let (status, data) = match load_stats(&state, now).await {
        Ok(stats) => (StatusCode::OK, stats),
        Err(e) => {
            tracing::warn!(error = %e, "stats query failed; serving fallback");
            (StatusCode::INTERNAL_SERVER_ERROR, SiteStats::fallback(now))
        }
    };

    (
        status,
        Json(ApiResponse {
            data,
            meta: ResponseMeta::new(req_id.0),
        }),
    )
}

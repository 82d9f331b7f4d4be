use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    Extension, Json,
};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use serde_json::json;
use ytopic_analysis::KeywordReport;
use ytopic_core::{check_keyword, KeywordCheck};
use ytopic_db::PopularKeywordRow;
use ytopic_youtube::YoutubeError;

use crate::middleware::{client_ip, RequestId};
use crate::search::{self, SearchError, SearchOutcome};

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

const POPULAR_WINDOW_DAYS: i64 = 7;
const POPULAR_LIMIT: i64 = 10;

#[derive(Debug, Serialize)]
pub(super) struct SearchResponse {
    #[serde(flatten)]
    report: KeywordReport,
    cached: bool,
    cache_expires_at: DateTime<Utc>,
}

impl From<SearchOutcome> for SearchResponse {
    fn from(outcome: SearchOutcome) -> Self {
        Self {
            report: outcome.report,
            cached: outcome.cached,
            cache_expires_at: outcome.cache_expires_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct ValidateResponse {
    valid: bool,
    blocked: bool,
    keyword: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub(super) struct PopularResponse {
    keywords: Vec<PopularKeywordRow>,
    count: usize,
}

/// Pull `keyword` out of the request body. Anything but a JSON object with a
/// string `keyword` is a validation error.
fn keyword_from_body(
    req_id: &str,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<String, ApiError> {
    let Json(body) = body.map_err(|rejection| {
        ApiError::new(req_id, "validation_error", rejection.body_text())
    })?;
    body.get("keyword")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ApiError::new(req_id, "validation_error", "keyword is required"))
}

fn map_search_error(request_id: String, error: SearchError) -> ApiError {
    match error {
        SearchError::Rejected(rejection) => {
            ApiError::new(request_id, "validation_error", rejection.to_string())
        }
        SearchError::Blocked { keyword, rule } => ApiError::new(
            request_id,
            "keyword_blocked",
            format!("keyword '{keyword}' is not allowed: {}", rule.reason),
        )
        .with_details(json!({
            "blocked": true,
            "category": rule.category,
            "reason": rule.reason,
        })),
        SearchError::NotConfigured => {
            tracing::error!("keyword search needs YOUTUBE_API_KEY");
            ApiError::new(
                request_id,
                "internal_error",
                "YouTube API key is not configured",
            )
        }
        SearchError::Upstream(e) => {
            tracing::error!(error = %e, "youtube request failed");
            let message = match e {
                YoutubeError::Api(message) => message,
                _ => "YouTube API request failed".to_string(),
            };
            ApiError::new(request_id, "upstream_error", message)
        }
        SearchError::Store(e) => map_db_error(request_id, &e),
        SearchError::Encode(e) => {
            tracing::error!(error = %e, "failed to encode keyword report");
            ApiError::new(request_id, "internal_error", "failed to store analysis")
        }
    }
}

pub(super) async fn search_keyword(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    headers: HeaderMap,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<ApiResponse<SearchResponse>>, ApiError> {
    let keyword = keyword_from_body(&req_id.0, body)?;
    let ip_address = client_ip(&headers);

    let outcome = search::search_keyword(
        state.keywords.as_ref(),
        state.youtube.as_ref(),
        &keyword,
        &ip_address,
        Utc::now(),
    )
    .await
    .map_err(|e| map_search_error(req_id.0.clone(), e))?;

    Ok(Json(ApiResponse {
        data: outcome.into(),
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// Length and denylist check only; never touches the store or the API.
pub(super) async fn validate_keyword(
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<ApiResponse<ValidateResponse>>, ApiError> {
    let raw = keyword_from_body(&req_id.0, body)?;
    let check = check_keyword(&raw)
        .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.to_string()))?;

    let data = match check {
        KeywordCheck::Allowed(keyword) => ValidateResponse {
            valid: true,
            blocked: false,
            keyword: keyword.to_string(),
            category: None,
            reason: None,
        },
        KeywordCheck::Blocked { keyword, rule } => ValidateResponse {
            valid: false,
            blocked: true,
            keyword: keyword.to_string(),
            category: Some(rule.category.as_str()),
            reason: Some(rule.reason),
        },
    };

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn popular_keywords(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<PopularResponse>>, ApiError> {
    let since = Utc::now() - Duration::days(POPULAR_WINDOW_DAYS);
    let keywords = state
        .keywords
        .list_popular_keywords(since, POPULAR_LIMIT)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: PopularResponse {
            count: keywords.len(),
            keywords,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[cfg(test)]
#[path = "keywords_test.rs"]
mod tests;

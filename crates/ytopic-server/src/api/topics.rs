use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ytopic_core::ContentType;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct TopicItem {
    id: i64,
    title: String,
    category: String,
    content_type: String,
    revenue_score: Decimal,
    competition_level: String,
    avg_views: i64,
    estimated_cpm: Decimal,
    engagement_rate: Option<Decimal>,
    growth_rate: Option<Decimal>,
    trending_keywords: Vec<String>,
    video_length_min: Option<i32>,
    video_length_max: Option<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub(super) struct CategoryItem {
    id: i64,
    name: String,
    display_name: String,
    avg_cpm: Decimal,
    icon: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TopicQuery {
    pub content_type: Option<String>,
}

pub(super) async fn list_topics(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<TopicQuery>,
) -> Result<Json<ApiResponse<Vec<TopicItem>>>, ApiError> {
    let content_type = query
        .content_type
        .as_deref()
        .map(str::parse::<ContentType>)
        .transpose()
        .map_err(|message| ApiError::new(req_id.0.clone(), "validation_error", message))?;

    let rows = state
        .topics
        .list_active_topics(content_type)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = rows
        .into_iter()
        .map(|row| TopicItem {
            id: row.id,
            title: row.title,
            category: row.category,
            content_type: row.content_type,
            revenue_score: row.revenue_score,
            competition_level: row.competition_level,
            avg_views: row.avg_views,
            estimated_cpm: row.estimated_cpm,
            engagement_rate: row.engagement_rate,
            growth_rate: row.growth_rate,
            trending_keywords: row.trending_keywords,
            video_length_min: row.video_length_min,
            video_length_max: row.video_length_max,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn list_categories(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<CategoryItem>>>, ApiError> {
    let rows = state
        .topics
        .list_categories()
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = rows
        .into_iter()
        .map(|row| CategoryItem {
            id: row.id,
            name: row.name,
            display_name: row.display_name,
            avg_cpm: row.avg_cpm,
            icon: row.icon,
            description: row.description,
        })
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

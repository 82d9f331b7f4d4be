//! Database operations for the `topics` table.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use ytopic_core::{ContentType, NewTopic};

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `topics` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TopicRow {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub content_type: String,
    pub revenue_score: Decimal,
    pub competition_level: String,
    pub avg_views: i64,
    pub estimated_cpm: Decimal,
    pub engagement_rate: Option<Decimal>,
    pub growth_rate: Option<Decimal>,
    pub trending_keywords: Vec<String>,
    pub video_length_min: Option<i32>,
    pub video_length_max: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Aggregates backing the site stats endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow)]
pub struct TopicStats {
    pub total_topics: i64,
    /// Topics with `revenue_score >= 7`.
    pub high_score_topics: i64,
    pub last_updated: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns active topics ordered by revenue score, optionally filtered by
/// content type.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_active_topics(
    pool: &PgPool,
    content_type: Option<ContentType>,
) -> Result<Vec<TopicRow>, DbError> {
    let rows = sqlx::query_as::<_, TopicRow>(
        "SELECT id, title, category, content_type, revenue_score, competition_level, avg_views, \
                estimated_cpm, engagement_rate, growth_rate, trending_keywords, \
                video_length_min, video_length_max, is_active, created_at, updated_at \
         FROM topics \
         WHERE is_active = true AND ($1::TEXT IS NULL OR content_type = $1) \
         ORDER BY revenue_score DESC, id ASC",
    )
    .bind(content_type.map(ContentType::as_str))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Inserts `topics` in a single transaction and returns how many were written.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any insert fails; nothing is written then.
pub async fn insert_topics(pool: &PgPool, topics: &[NewTopic]) -> Result<usize, DbError> {
    let mut tx = pool.begin().await?;

    for topic in topics {
        sqlx::query(
            "INSERT INTO topics \
                 (title, category, content_type, revenue_score, competition_level, avg_views, \
                  estimated_cpm, trending_keywords, video_length_min, video_length_max, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, true)",
        )
        .bind(&topic.title)
        .bind(&topic.category)
        .bind(topic.content_type.as_str())
        .bind(topic.revenue_score)
        .bind(topic.competition_level.as_str())
        .bind(topic.avg_views)
        .bind(topic.estimated_cpm)
        .bind(&topic.trending_keywords)
        .bind(topic.video_length_min)
        .bind(topic.video_length_max)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(topics.len())
}

/// Marks active topics created before `cutoff` inactive. Returns the number
/// of rows changed.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the update fails.
pub async fn deactivate_topics_created_before(
    pool: &PgPool,
    cutoff: DateTime<Utc>,
) -> Result<u64, DbError> {
    let result = sqlx::query(
        "UPDATE topics \
         SET is_active = false, updated_at = NOW() \
         WHERE is_active = true AND created_at < $1",
    )
    .bind(cutoff)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Total number of topics, active or not.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_topics(pool: &PgPool) -> Result<i64, DbError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM topics")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Topic counts and the latest `updated_at`, in one round trip.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn topic_stats(pool: &PgPool) -> Result<TopicStats, DbError> {
    let stats = sqlx::query_as::<_, TopicStats>(
        "SELECT COUNT(*) AS total_topics, \
                COUNT(*) FILTER (WHERE revenue_score >= 7) AS high_score_topics, \
                MAX(updated_at) AS last_updated \
         FROM topics",
    )
    .fetch_one(pool)
    .await?;

    Ok(stats)
}

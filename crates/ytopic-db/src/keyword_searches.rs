//! Database operations for the `keyword_searches` table.
//!
//! The table doubles as the analysis cache and the search counter. A row with
//! a non-null `result_data` and `cache_expires_at > now` is a cache hit;
//! counter-only rows carry no payload and are born expired.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `keyword_searches` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct KeywordSearchRow {
    pub id: i64,
    pub keyword: String,
    pub ip_address: String,
    pub result_data: Option<serde_json::Value>,
    pub cache_expires_at: DateTime<Utc>,
    pub search_count: i32,
    pub is_blocked: bool,
    pub created_at: DateTime<Utc>,
    pub last_searched_at: DateTime<Utc>,
}

/// A cache entry to insert.
#[derive(Debug, Clone, Copy)]
pub struct NewKeywordSearch<'a> {
    pub keyword: &'a str,
    pub ip_address: &'a str,
    pub result_data: &'a serde_json::Value,
    pub cache_expires_at: DateTime<Utc>,
}

/// Aggregated search volume for one keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct PopularKeywordRow {
    pub keyword: String,
    pub search_count: i64,
    pub last_searched_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns the most recent unexpired cache entry for `keyword`, if any.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn find_cached_search(
    pool: &PgPool,
    keyword: &str,
    now: DateTime<Utc>,
) -> Result<Option<KeywordSearchRow>, DbError> {
    let row = sqlx::query_as::<_, KeywordSearchRow>(
        "SELECT id, keyword, ip_address, result_data, cache_expires_at, search_count, \
                is_blocked, created_at, last_searched_at \
         FROM keyword_searches \
         WHERE keyword = $1 AND result_data IS NOT NULL AND cache_expires_at > $2 \
         ORDER BY created_at DESC, id DESC \
         LIMIT 1",
    )
    .bind(keyword)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Inserts a cache entry and returns its id.
///
/// The row starts with `search_count = 0`; callers follow up with
/// [`increment_search_count`].
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_keyword_search(
    pool: &PgPool,
    search: &NewKeywordSearch<'_>,
) -> Result<i64, DbError> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO keyword_searches (keyword, ip_address, result_data, cache_expires_at, search_count) \
         VALUES ($1, $2, $3, $4, 0) \
         RETURNING id",
    )
    .bind(search.keyword)
    .bind(search.ip_address)
    .bind(search.result_data)
    .bind(search.cache_expires_at)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Bumps `search_count` and `last_searched_at` on the most recent row for
/// `keyword`. When the keyword has no row yet, inserts a counter-only row
/// with no payload that is already expired.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if either statement fails.
pub async fn increment_search_count(
    pool: &PgPool,
    keyword: &str,
    ip_address: &str,
    now: DateTime<Utc>,
) -> Result<(), DbError> {
    let mut tx = pool.begin().await?;

    let updated = sqlx::query(
        "UPDATE keyword_searches \
         SET search_count = search_count + 1, last_searched_at = $3, ip_address = $2 \
         WHERE id = ( \
             SELECT id FROM keyword_searches \
             WHERE keyword = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT 1 \
         )",
    )
    .bind(keyword)
    .bind(ip_address)
    .bind(now)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    if updated == 0 {
        sqlx::query(
            "INSERT INTO keyword_searches \
                 (keyword, ip_address, result_data, cache_expires_at, search_count, last_searched_at) \
             VALUES ($1, $2, NULL, $3, 1, $3)",
        )
        .bind(keyword)
        .bind(ip_address)
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}

/// Returns up to `limit` non-blocked keywords searched since `since`,
/// ordered by summed search count.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_popular_keywords(
    pool: &PgPool,
    since: DateTime<Utc>,
    limit: i64,
) -> Result<Vec<PopularKeywordRow>, DbError> {
    let rows = sqlx::query_as::<_, PopularKeywordRow>(
        "SELECT keyword, \
                SUM(search_count)::BIGINT AS search_count, \
                MAX(last_searched_at) AS last_searched_at \
         FROM keyword_searches \
         WHERE is_blocked = false AND last_searched_at >= $1 \
         GROUP BY keyword \
         HAVING SUM(search_count) > 0 \
         ORDER BY SUM(search_count) DESC, keyword ASC \
         LIMIT $2",
    )
    .bind(since)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

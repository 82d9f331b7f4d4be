//! Postgres persistence for ytopic: the keyword cache and counter, the topic
//! catalogue, and categories.
//!
//! Query functions take a `&PgPool` directly. The HTTP layer goes through the
//! [`KeywordStore`] and [`TopicStore`] traits instead, implemented here by
//! [`PgStore`].

pub mod categories;
pub mod keyword_searches;
pub mod repository;
pub mod rotation;
pub mod seed;
pub mod topics;

use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use ytopic_core::AppConfig;

pub use categories::{count_categories, list_categories, CategoryRow};
pub use keyword_searches::{
    find_cached_search, increment_search_count, insert_keyword_search, list_popular_keywords,
    KeywordSearchRow, NewKeywordSearch, PopularKeywordRow,
};
pub use repository::{KeywordStore, PgStore, TopicStore};
pub use rotation::{rotation_cutoff, run_topic_rotation, RotationSummary};
pub use seed::{
    add_trending_topics, sample_categories, sample_topics, seed_sample_data, trending_topics,
    SeedSummary,
};
pub use topics::{
    count_topics, deactivate_topics_created_before, insert_topics, list_active_topics,
    topic_stats, TopicRow, TopicStats,
};

/// Embedded from `<workspace-root>/migrations/`.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

#[derive(Debug, Error)]
pub enum DbError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Pool sizing. Defaults match the `YTOPIC_DB_*` defaults in `AppConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 1,
            acquire_timeout_secs: 10,
        }
    }
}

impl PoolConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            max_connections: config.db_max_connections,
            min_connections: config.db_min_connections,
            acquire_timeout_secs: config.db_acquire_timeout_secs,
        }
    }
}

/// Open a pool against `database_url`.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if no connection can be established within the
/// acquire timeout.
pub async fn connect_pool(database_url: &str, config: PoolConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(database_url)
        .await
}

/// Apply pending migrations and return how many were applied by this call.
///
/// # Errors
///
/// Returns [`sqlx::migrate::MigrateError`] if any migration fails.
pub async fn run_migrations(pool: &PgPool) -> Result<usize, sqlx::migrate::MigrateError> {
    let before = applied_migrations(pool).await;
    MIGRATOR.run(pool).await?;
    let after = applied_migrations(pool).await;

    Ok(usize::try_from((after - before).max(0)).unwrap_or(0))
}

/// Successful rows in `_sqlx_migrations`; zero before the table exists.
async fn applied_migrations(pool: &PgPool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = true")
        .fetch_one(pool)
        .await
        .unwrap_or(0)
}

/// Round-trip a `SELECT 1`.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await?;
    Ok(())
}

/// [`ping`] with the error lifted into [`DbError`].
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the ping fails.
pub async fn health_check(pool: &PgPool) -> Result<(), DbError> {
    ping(pool).await?;
    Ok(())
}

//! Store traits consumed by the HTTP layer, and their Postgres implementation.
//!
//! Handlers depend on these traits rather than on `PgPool` so they can run
//! against an in-memory store in tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use ytopic_core::{ContentType, NewTopic};

use crate::{
    categories, keyword_searches, topics, CategoryRow, DbError, KeywordSearchRow,
    NewKeywordSearch, PopularKeywordRow, TopicRow, TopicStats,
};

/// Keyword cache and search counter.
#[async_trait]
pub trait KeywordStore: Send + Sync {
    /// Most recent unexpired entry with a payload.
    async fn find_cached_search(
        &self,
        keyword: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<KeywordSearchRow>, DbError>;

    async fn insert_keyword_search(&self, search: &NewKeywordSearch<'_>) -> Result<i64, DbError>;

    async fn increment_search_count(
        &self,
        keyword: &str,
        ip_address: &str,
        now: DateTime<Utc>,
    ) -> Result<(), DbError>;

    async fn list_popular_keywords(
        &self,
        since: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<PopularKeywordRow>, DbError>;
}

/// Topics and categories.
#[async_trait]
pub trait TopicStore: Send + Sync {
    async fn health_check(&self) -> Result<(), DbError>;

    async fn list_active_topics(
        &self,
        content_type: Option<ContentType>,
    ) -> Result<Vec<TopicRow>, DbError>;

    async fn list_categories(&self) -> Result<Vec<CategoryRow>, DbError>;

    async fn count_topics(&self) -> Result<i64, DbError>;

    async fn count_categories(&self) -> Result<i64, DbError>;

    async fn topic_stats(&self) -> Result<TopicStats, DbError>;

    async fn insert_topics(&self, topics: &[NewTopic]) -> Result<usize, DbError>;

    async fn deactivate_topics_created_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, DbError>;
}

/// Postgres-backed store.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl KeywordStore for PgStore {
    async fn find_cached_search(
        &self,
        keyword: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<KeywordSearchRow>, DbError> {
        keyword_searches::find_cached_search(&self.pool, keyword, now).await
    }

    async fn insert_keyword_search(&self, search: &NewKeywordSearch<'_>) -> Result<i64, DbError> {
        keyword_searches::insert_keyword_search(&self.pool, search).await
    }

    async fn increment_search_count(
        &self,
        keyword: &str,
        ip_address: &str,
        now: DateTime<Utc>,
    ) -> Result<(), DbError> {
        keyword_searches::increment_search_count(&self.pool, keyword, ip_address, now).await
    }

    async fn list_popular_keywords(
        &self,
        since: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<PopularKeywordRow>, DbError> {
        keyword_searches::list_popular_keywords(&self.pool, since, limit).await
    }
}

#[async_trait]
impl TopicStore for PgStore {
    async fn health_check(&self) -> Result<(), DbError> {
        crate::health_check(&self.pool).await
    }

    async fn list_active_topics(
        &self,
        content_type: Option<ContentType>,
    ) -> Result<Vec<TopicRow>, DbError> {
        topics::list_active_topics(&self.pool, content_type).await
    }

    async fn list_categories(&self) -> Result<Vec<CategoryRow>, DbError> {
        categories::list_categories(&self.pool).await
    }

    async fn count_topics(&self) -> Result<i64, DbError> {
        topics::count_topics(&self.pool).await
    }

    async fn count_categories(&self) -> Result<i64, DbError> {
        categories::count_categories(&self.pool).await
    }

    async fn topic_stats(&self) -> Result<TopicStats, DbError> {
        topics::topic_stats(&self.pool).await
    }

    async fn insert_topics(&self, new_topics: &[NewTopic]) -> Result<usize, DbError> {
        topics::insert_topics(&self.pool, new_topics).await
    }

    async fn deactivate_topics_created_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, DbError> {
        topics::deactivate_topics_created_before(&self.pool, cutoff).await
    }
}

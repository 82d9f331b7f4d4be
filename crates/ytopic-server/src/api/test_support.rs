//! In-memory store and request helpers for handler tests.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use ytopic_core::{ContentType, NewTopic};
use ytopic_db::{
    CategoryRow, DbError, KeywordSearchRow, KeywordStore, NewKeywordSearch, PopularKeywordRow,
    TopicRow, TopicStats, TopicStore,
};
use ytopic_youtube::YoutubeClient;

use super::{build_app, AppState};
use crate::middleware::{CronAuth, RateLimitState};

#[derive(Default)]
struct Inner {
    searches: Vec<KeywordSearchRow>,
    topics: Vec<TopicRow>,
    categories: Vec<CategoryRow>,
    failing: bool,
    next_id: i64,
}

impl Inner {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn check(&self) -> Result<(), DbError> {
        if self.failing {
            Err(DbError::Sqlx(sqlx::Error::PoolTimedOut))
        } else {
            Ok(())
        }
    }
}

/// Shared-state store; clones see the same data.
#[derive(Clone, Default)]
pub(crate) struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("memory store lock")
    }

    pub(crate) fn set_failing(&self, failing: bool) {
        self.lock().failing = failing;
    }

    pub(crate) fn push_topic(&self, title: &str, score_tenths: i64, created_at: DateTime<Utc>) {
        let mut inner = self.lock();
        let id = inner.next_id();
        inner.topics.push(TopicRow {
            id,
            title: title.to_string(),
            category: "education".to_string(),
            content_type: "long".to_string(),
            revenue_score: Decimal::new(score_tenths, 1),
            competition_level: "medium".to_string(),
            avg_views: 10_000,
            estimated_cpm: Decimal::new(1000, 2),
            engagement_rate: None,
            growth_rate: None,
            trending_keywords: vec![title.to_string()],
            video_length_min: Some(600),
            video_length_max: Some(1800),
            is_active: true,
            created_at,
            updated_at: created_at,
        });
    }

    pub(crate) fn push_category(&self, name: &str, display_name: &str) {
        let mut inner = self.lock();
        let id = inner.next_id();
        inner.categories.push(CategoryRow {
            id,
            name: name.to_string(),
            display_name: display_name.to_string(),
            avg_cpm: Decimal::new(800, 2),
            icon: None,
            description: None,
            created_at: Utc::now(),
        });
    }

    /// Insert a cache row directly, bypassing the search flow.
    pub(crate) fn push_search(
        &self,
        keyword: &str,
        result_data: Option<serde_json::Value>,
        cache_expires_at: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) {
        let mut inner = self.lock();
        let id = inner.next_id();
        inner.searches.push(KeywordSearchRow {
            id,
            keyword: keyword.to_string(),
            ip_address: "unknown".to_string(),
            result_data,
            cache_expires_at,
            search_count: 1,
            is_blocked: false,
            created_at,
            last_searched_at: created_at,
        });
    }

    pub(crate) fn searches(&self) -> Vec<KeywordSearchRow> {
        self.lock().searches.clone()
    }

    pub(crate) fn active_titles(&self) -> Vec<String> {
        self.lock()
            .topics
            .iter()
            .filter(|t| t.is_active)
            .map(|t| t.title.clone())
            .collect()
    }

    pub(crate) fn state(&self, youtube: Option<YoutubeClient>) -> AppState {
        AppState {
            keywords: Arc::new(self.clone()),
            topics: Arc::new(self.clone()),
            youtube,
        }
    }

    /// App with cron auth disabled and a generous rate limit.
    pub(crate) fn app(&self, youtube: Option<YoutubeClient>) -> Router {
        build_app(
            self.state(youtube),
            CronAuth::from_config(None, true).expect("dev cron auth"),
            RateLimitState::per_minute(10_000),
        )
    }
}

fn latest_for<'a>(
    rows: impl Iterator<Item = &'a mut KeywordSearchRow>,
) -> Option<&'a mut KeywordSearchRow> {
    rows.max_by_key(|r| (r.created_at, r.id))
}

#[async_trait]
impl KeywordStore for MemoryStore {
    async fn find_cached_search(
        &self,
        keyword: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<KeywordSearchRow>, DbError> {
        let inner = self.lock();
        inner.check()?;
        Ok(inner
            .searches
            .iter()
            .filter(|r| r.keyword == keyword && r.result_data.is_some() && r.cache_expires_at > now)
            .max_by_key(|r| (r.created_at, r.id))
            .cloned())
    }

    async fn insert_keyword_search(&self, search: &NewKeywordSearch<'_>) -> Result<i64, DbError> {
        let mut inner = self.lock();
        inner.check()?;
        let id = inner.next_id();
        let now = Utc::now();
        inner.searches.push(KeywordSearchRow {
            id,
            keyword: search.keyword.to_string(),
            ip_address: search.ip_address.to_string(),
            result_data: Some(search.result_data.clone()),
            cache_expires_at: search.cache_expires_at,
            search_count: 0,
            is_blocked: false,
            created_at: now,
            last_searched_at: now,
        });
        Ok(id)
    }

    async fn increment_search_count(
        &self,
        keyword: &str,
        ip_address: &str,
        now: DateTime<Utc>,
    ) -> Result<(), DbError> {
        let mut inner = self.lock();
        inner.check()?;
        if let Some(row) = latest_for(inner.searches.iter_mut().filter(|r| r.keyword == keyword)) {
            row.search_count += 1;
            row.last_searched_at = now;
            row.ip_address = ip_address.to_string();
            return Ok(());
        }
        let id = inner.next_id();
        inner.searches.push(KeywordSearchRow {
            id,
            keyword: keyword.to_string(),
            ip_address: ip_address.to_string(),
            result_data: None,
            cache_expires_at: now,
            search_count: 1,
            is_blocked: false,
            created_at: now,
            last_searched_at: now,
        });
        Ok(())
    }

    async fn list_popular_keywords(
        &self,
        since: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<PopularKeywordRow>, DbError> {
        let inner = self.lock();
        inner.check()?;
        let mut grouped: BTreeMap<&str, (i64, DateTime<Utc>)> = BTreeMap::new();
        for row in inner
            .searches
            .iter()
            .filter(|r| !r.is_blocked && r.last_searched_at >= since)
        {
            let entry = grouped
                .entry(row.keyword.as_str())
                .or_insert((0, row.last_searched_at));
            entry.0 += i64::from(row.search_count);
            entry.1 = entry.1.max(row.last_searched_at);
        }
        let mut rows: Vec<PopularKeywordRow> = grouped
            .into_iter()
            .filter(|(_, (count, _))| *count > 0)
            .map(|(keyword, (search_count, last_searched_at))| PopularKeywordRow {
                keyword: keyword.to_string(),
                search_count,
                last_searched_at,
            })
            .collect();
        rows.sort_by(|a, b| b.search_count.cmp(&a.search_count));
        rows.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(rows)
    }
}

#[async_trait]
impl TopicStore for MemoryStore {
    async fn health_check(&self) -> Result<(), DbError> {
        self.lock().check()
    }

    async fn list_active_topics(
        &self,
        content_type: Option<ContentType>,
    ) -> Result<Vec<TopicRow>, DbError> {
        let inner = self.lock();
        inner.check()?;
        let mut rows: Vec<TopicRow> = inner
            .topics
            .iter()
            .filter(|t| t.is_active)
            .filter(|t| content_type.is_none_or(|ct| t.content_type == ct.as_str()))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.revenue_score.cmp(&a.revenue_score).then(a.id.cmp(&b.id)));
        Ok(rows)
    }

    async fn list_categories(&self) -> Result<Vec<CategoryRow>, DbError> {
        let inner = self.lock();
        inner.check()?;
        let mut rows = inner.categories.clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn count_topics(&self) -> Result<i64, DbError> {
        let inner = self.lock();
        inner.check()?;
        Ok(i64::try_from(inner.topics.len()).unwrap_or(i64::MAX))
    }

    async fn count_categories(&self) -> Result<i64, DbError> {
        let inner = self.lock();
        inner.check()?;
        Ok(i64::try_from(inner.categories.len()).unwrap_or(i64::MAX))
    }

    async fn topic_stats(&self) -> Result<TopicStats, DbError> {
        let inner = self.lock();
        inner.check()?;
        let seven = Decimal::new(7, 0);
        Ok(TopicStats {
            total_topics: i64::try_from(inner.topics.len()).unwrap_or(i64::MAX),
            high_score_topics: i64::try_from(
                inner
                    .topics
                    .iter()
                    .filter(|t| t.revenue_score >= seven)
                    .count(),
            )
            .unwrap_or(i64::MAX),
            last_updated: inner.topics.iter().map(|t| t.updated_at).max(),
        })
    }

    async fn insert_topics(&self, topics: &[NewTopic]) -> Result<usize, DbError> {
        let mut inner = self.lock();
        inner.check()?;
        let now = Utc::now();
        for topic in topics {
            let id = inner.next_id();
            inner.topics.push(TopicRow {
                id,
                title: topic.title.clone(),
                category: topic.category.clone(),
                content_type: topic.content_type.as_str().to_string(),
                revenue_score: topic.revenue_score,
                competition_level: topic.competition_level.as_str().to_string(),
                avg_views: topic.avg_views,
                estimated_cpm: topic.estimated_cpm,
                engagement_rate: None,
                growth_rate: None,
                trending_keywords: topic.trending_keywords.clone(),
                video_length_min: Some(topic.video_length_min),
                video_length_max: Some(topic.video_length_max),
                is_active: true,
                created_at: now,
                updated_at: now,
            });
        }
        Ok(topics.len())
    }

    async fn deactivate_topics_created_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, DbError> {
        let mut inner = self.lock();
        inner.check()?;
        let mut changed = 0;
        for topic in inner
            .topics
            .iter_mut()
            .filter(|t| t.is_active && t.created_at < cutoff)
        {
            topic.is_active = false;
            changed += 1;
        }
        Ok(changed)
    }
}

pub(crate) fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub(crate) fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-forwarded-for", "203.0.113.5, 10.0.0.1")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub(crate) async fn read_json(response: Response) -> serde_json::Value {
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&body).expect("json parse")
}

//! Monthly topic rotation: retire stale topics and add seasonal ones.

use chrono::{DateTime, Datelike, Duration, Months, Utc};
use serde::Serialize;
use ytopic_core::seasonal_topics;

use crate::{DbError, TopicStore};

/// Topics older than this many months are deactivated.
const TOPIC_MAX_AGE_MONTHS: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RotationSummary {
    pub before_count: i64,
    pub after_count: i64,
    pub added_count: usize,
    pub deactivated_count: u64,
    pub ran_at: DateTime<Utc>,
}

/// Three calendar months before `now`, clamped to the end of shorter months
/// (May 31 → Feb 28).
#[must_use]
pub fn rotation_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now.checked_sub_months(Months::new(TOPIC_MAX_AGE_MONTHS))
        .unwrap_or_else(|| now - Duration::days(90))
}

/// Deactivate active topics created before [`rotation_cutoff`], then insert
/// the seasonal topics for `now`'s month.
///
/// # Errors
///
/// Returns [`DbError`] if any store call fails. Deactivation is not rolled
/// back when the insert fails.
pub async fn run_topic_rotation(
    store: &dyn TopicStore,
    now: DateTime<Utc>,
) -> Result<RotationSummary, DbError> {
    let before_count = store.count_topics().await?;

    let cutoff = rotation_cutoff(now);
    let deactivated_count = store.deactivate_topics_created_before(cutoff).await?;

    let added_count = store.insert_topics(&seasonal_topics(now.month())).await?;
    let after_count = store.count_topics().await?;

    tracing::info!(
        before_count,
        after_count,
        added_count,
        deactivated_count,
        %cutoff,
        "topic rotation complete"
    );
    Ok(RotationSummary {
        before_count,
        after_count,
        added_count,
        deactivated_count,
        ran_at: now,
    })
}

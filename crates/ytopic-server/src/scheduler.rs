//! Background job scheduler.
//!
//! Initialises a [`JobScheduler`] at server startup and registers the
//! monthly topic rotation.

use std::sync::Arc;

use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};
use ytopic_db::{run_topic_rotation, TopicStore};

/// Builds and starts the background job scheduler.
///
/// Returns the running [`JobScheduler`] handle, which must be kept alive
/// for the lifetime of the process. Dropping it shuts down all jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// the cron expression is invalid, or the scheduler fails to start.
pub async fn build_scheduler(
    topics: Arc<dyn TopicStore>,
    config: &ytopic_core::AppConfig,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    register_topic_rotation_job(&scheduler, topics, &config.topic_rotation_cron).await?;

    scheduler.start().await?;
    Ok(scheduler)
}

/// Register the topic rotation job on `cron` (six-field, UTC).
async fn register_topic_rotation_job(
    scheduler: &JobScheduler,
    topics: Arc<dyn TopicStore>,
    cron: &str,
) -> Result<(), JobSchedulerError> {
    let job = Job::new_async(cron, move |_uuid, _lock| {
        let topics = Arc::clone(&topics);

        Box::pin(async move {
            tracing::info!("scheduler: starting topic rotation run");
            match run_topic_rotation(topics.as_ref(), chrono::Utc::now()).await {
                Ok(summary) => tracing::info!(
                    added = summary.added_count,
                    deactivated = summary.deactivated_count,
                    "scheduler: topic rotation run complete"
                ),
                Err(e) => tracing::error!(error = %e, "scheduler: topic rotation failed"),
            }
        })
    })?;

    scheduler.add(job).await?;
    tracing::info!(cron, "scheduler: registered topic rotation job");
    Ok(())
}

//! Background job scheduler.
//!
//! The only job is the opt-in observed-location refresh. Without a
//! configured cron expression the scheduler starts empty.

use sqlx::PgPool;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};
use vegmart_db::PgLocationSource;

use crate::location_cache::LocationCache;

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
    pool: PgPool,
    locations: LocationCache,
    refresh_cron: Option<&str>,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    if let Some(schedule) = refresh_cron {
        register_location_refresh_job(&scheduler, pool, locations, schedule).await?;
    }

    scheduler.start().await?;
    Ok(scheduler)
}

/// Register a recurring refresh of the observed-location set.
async fn register_location_refresh_job(
    scheduler: &JobScheduler,
    pool: PgPool,
    locations: LocationCache,
    schedule: &str,
) -> Result<(), JobSchedulerError> {
    let job = Job::new_async(schedule, move |_uuid, _lock| {
        let source = PgLocationSource::new(pool.clone());
        let locations = locations.clone();

        Box::pin(async move {
            tracing::info!("scheduler: starting observed-location refresh");
            let outcome = locations.refresh(&source).await;
            tracing::info!(?outcome, "scheduler: observed-location refresh complete");
        })
    })?;

    scheduler.add(job).await?;
    tracing::info!(schedule, "scheduler: observed-location refresh registered");
    Ok(())
}

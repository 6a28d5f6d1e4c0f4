//! Courier performance and guarantee settlement engine
//!
//! # Module layout
//!
//! - [`core`] - configuration, job context, periods, scheduling
//! - [`db`] - data-access interface with Postgres and in-memory backends
//! - [`cache`] - live courier location cache
//! - [`pricing`] - tiered delivery/bonus tariffs
//! - [`performance`] - terminal groups, period metrics, ranking
//! - [`settlement`] - guarantee, bonus and balance settlement
//! - [`work_schedule`] - daily attendance closer

pub mod cache;
pub mod cli;
pub mod core;
pub mod db;
pub mod performance;
pub mod pricing;
pub mod settlement;
pub mod utils;
pub mod work_schedule;

pub use crate::core::{BatchReport, Config, CourierOutcome, JobContext, JobError, JobResult, Period};

use chrono::NaiveDate;

use crate::cli::Job;

/// Run a one-shot job for business day `today`
///
/// Returns the batch reports of the performance/settlement parts. A batch
/// with failed couriers is still `Ok`; only setup failures are errors.
pub async fn run_job(
    ctx: &JobContext,
    job: Job,
    month: Option<Period>,
    today: NaiveDate,
) -> JobResult<Vec<BatchReport>> {
    let mut reports = Vec::new();

    if matches!(job, Job::CloseShifts | Job::All) {
        work_schedule::close_stale_entries(ctx).await?;
    }
    if matches!(job, Job::Performance | Job::All) {
        let period = cli::resolve_period(Job::Performance, month, today);
        reports.push(performance::job::run_monthly(ctx, period).await?);
    }
    if matches!(job, Job::Settlement | Job::All) {
        let period = cli::resolve_period(Job::Settlement, month, today);
        let as_of = period.end.min(today);
        reports.push(settlement::job::run_monthly(ctx, period, as_of).await?);
    }

    Ok(reports)
}

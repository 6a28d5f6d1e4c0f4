//! Monthly performance batch
//!
//! Ranks every active courier inside its terminal group and replaces the
//! period's `courier_performance` rows.

use shared::models::{Courier, CourierFilter, CourierPerformance};

use super::PerformanceRun;
use crate::core::{BatchReport, CourierOutcome, JobContext, JobResult, Period};

pub const JOB: &str = "performance";

pub async fn run_monthly(ctx: &JobContext, period: Period) -> JobResult<BatchReport> {
    ctx.store.ping().await?;

    let window = period.window(ctx.tz());
    let mut run = PerformanceRun::new(ctx.store.as_ref(), window).await?;
    let couriers = ctx.store.find_couriers(&CourierFilter::active()).await?;
    tracing::info!(period = %period, couriers = couriers.len(), "Starting performance batch");

    let mut report = BatchReport::new(JOB, period.label());
    for courier in &couriers {
        let outcome = ctx
            .run_courier(JOB, courier.id, write_courier(ctx, &mut run, courier))
            .await;
        report.record(courier.id, outcome);
    }

    report.log_summary();
    Ok(report)
}

async fn write_courier(
    ctx: &JobContext,
    run: &mut PerformanceRun<'_>,
    courier: &Courier,
) -> JobResult<CourierOutcome> {
    let evaluation = run.evaluate(courier).await?;

    let row = CourierPerformance {
        courier_id: courier.id,
        period_start: run.window().start,
        rating: evaluation.metrics.average_score,
        delivery_count: evaluation.metrics.delivery_count,
        delivery_average_time: evaluation.metrics.average_delivery_time,
        position: evaluation.ranking.position as i32,
        total_active_couriers: evaluation.ranking.cohort_size as i32,
        terminal_keys: evaluation.group.keys(),
    };
    ctx.store.replace_performance(&row).await?;

    Ok(CourierOutcome::Written)
}

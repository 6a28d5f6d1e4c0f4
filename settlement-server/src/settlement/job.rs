//! Monthly settlement batch
//!
//! Evaluates every active courier for the period, prices its finished orders,
//! applies the daily guarantee and replaces the period's
//! `courier_settlements` rows.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use shared::models::{Courier, CourierFilter, GarantTariff, PricingKind};

use super::calculator::{self, SettlementInput};
use super::calendar::{self, GarantRange};
use crate::core::{BatchReport, CourierOutcome, JobContext, JobError, JobResult, Period};
use crate::performance::PerformanceRun;
use crate::pricing::RuleBook;
use crate::utils::time;

pub const JOB: &str = "settlement";

/// Per-run lookups shared between couriers
struct SettlementRun<'a> {
    performance: PerformanceRun<'a>,
    period: Period,
    as_of: NaiveDate,
    rule_books: HashMap<i64, RuleBook>,
    tariffs: HashMap<i64, Option<GarantTariff>>,
    created_at: i64,
}

/// Settle `period`, counting garant days up to `as_of`
pub async fn run_monthly(ctx: &JobContext, period: Period, as_of: NaiveDate) -> JobResult<BatchReport> {
    if as_of < period.start {
        return Err(JobError::InvalidPeriod(format!(
            "{period} has not started on {as_of}"
        )));
    }
    ctx.store.ping().await?;

    let window = period.window(ctx.tz());
    let mut run = SettlementRun {
        performance: PerformanceRun::new(ctx.store.as_ref(), window).await?,
        period,
        as_of,
        rule_books: HashMap::new(),
        tariffs: HashMap::new(),
        created_at: shared::util::now_millis(),
    };

    let couriers = ctx.store.find_couriers(&CourierFilter::active()).await?;
    tracing::info!(period = %period, %as_of, couriers = couriers.len(), "Starting settlement batch");

    let mut report = BatchReport::new(JOB, period.label());
    for courier in &couriers {
        let outcome = ctx
            .run_courier(JOB, courier.id, settle_courier(ctx, &mut run, courier))
            .await;
        report.record(courier.id, outcome);
    }

    report.log_summary();
    Ok(report)
}

async fn settle_courier(
    ctx: &JobContext,
    run: &mut SettlementRun<'_>,
    courier: &Courier,
) -> JobResult<CourierOutcome> {
    let evaluation = run.performance.evaluate(courier).await?;
    let window = run.performance.window();
    let tariff = run.tariff(ctx, courier).await?;

    let garant_orders = match &tariff {
        Some(tariff) => {
            let order_start = courier
                .order_start_date
                .as_deref()
                .map(time::parse_date)
                .transpose()?;
            match GarantRange::eligible(run.period, order_start, run.as_of) {
                Some(range) => {
                    let cutoff = calendar::garant_cutoff(tariff, ctx.cutoff());
                    run.performance
                        .aggregator()
                        .finished_orders(courier.id, &evaluation.group, range.window(cutoff, ctx.tz()))
                        .await?
                }
                None => Vec::new(),
            }
        }
        None => Vec::new(),
    };

    let organizations: BTreeSet<i64> = evaluation
        .metrics
        .finished_orders
        .iter()
        .map(|o| o.organization_id)
        .collect();
    let rule_book = run.rule_book(ctx, &organizations).await?;

    let (work_entries, balance) = tokio::try_join!(
        ctx.store.find_work_entries(courier.id, window.start, window.end),
        ctx.store.balance_totals(courier.id, window.end),
    )?;

    let row = calculator::settle(&SettlementInput {
        courier,
        period: run.period,
        window,
        as_of: run.as_of,
        metrics: &evaluation.metrics,
        ranking: evaluation.ranking,
        tariff: tariff.as_ref(),
        rule_book: &rule_book,
        garant_orders: &garant_orders,
        work_entries: &work_entries,
        balance,
        config: &ctx.config,
        created_at: run.created_at,
    })?;

    tracing::debug!(
        courier_id = courier.id,
        earned = row.earned,
        garant_price = row.garant_price,
        top_up = row.garant_top_up,
        "Courier settled"
    );
    ctx.store.replace_settlement(&row).await?;

    Ok(CourierOutcome::Written)
}

impl SettlementRun<'_> {
    async fn tariff(&mut self, ctx: &JobContext, courier: &Courier) -> JobResult<Option<GarantTariff>> {
        let Some(id) = courier.daily_garant_id else {
            return Ok(None);
        };
        if let Some(tariff) = self.tariffs.get(&id) {
            return Ok(tariff.clone());
        }
        let tariff = ctx.store.find_garant_tariff(id).await?;
        if tariff.is_none() {
            tracing::warn!(courier_id = courier.id, tariff_id = id, "Garant tariff not found");
        }
        self.tariffs.insert(id, tariff.clone());
        Ok(tariff)
    }

    /// Active rule sets of every organization the courier delivered for
    async fn rule_book(&mut self, ctx: &JobContext, organizations: &BTreeSet<i64>) -> JobResult<RuleBook> {
        let mut merged = RuleBook::default();
        for &organization_id in organizations {
            if !self.rule_books.contains_key(&organization_id) {
                let (delivery, order_bonus, constructed_bonus) = tokio::try_join!(
                    ctx.store.find_pricing_rule_sets(organization_id, PricingKind::Delivery),
                    ctx.store.find_pricing_rule_sets(organization_id, PricingKind::OrderBonus),
                    ctx.store.find_pricing_rule_sets(organization_id, PricingKind::ConstructedBonus),
                )?;
                self.rule_books.insert(
                    organization_id,
                    RuleBook {
                        delivery,
                        order_bonus,
                        constructed_bonus,
                    },
                );
            }
            if let Some(book) = self.rule_books.get(&organization_id) {
                merged.delivery.extend(book.delivery.iter().cloned());
                merged.order_bonus.extend(book.order_bonus.iter().cloned());
                merged.constructed_bonus.extend(book.constructed_bonus.iter().cloned());
            }
        }
        Ok(merged)
    }
}

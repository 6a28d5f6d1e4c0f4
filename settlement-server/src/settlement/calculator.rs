//! Guarantee/Bonus Settlement Calculator
//!
//! Pure computation of one courier's settlement row from already-loaded
//! inputs. All money is summed in `Decimal` and rounded to 2 dp on output.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::models::{BalanceTotals, Courier, CourierSettlement, GarantTariff, Order, WorkScheduleEntry};

use super::calendar::{self, GarantRange};
use crate::core::{Config, JobResult, Period, TimeWindow};
use crate::performance::{PeriodMetrics, RankingResult};
use crate::pricing::RuleBook;
use crate::utils::money::{to_decimal, to_f64};
use crate::utils::time;

/// Everything needed to settle one courier
pub struct SettlementInput<'a> {
    pub courier: &'a Courier,
    pub period: Period,
    pub window: TimeWindow,
    /// Last garant day that may count (business date of the run)
    pub as_of: NaiveDate,
    pub metrics: &'a PeriodMetrics,
    pub ranking: RankingResult,
    pub tariff: Option<&'a GarantTariff>,
    pub rule_book: &'a RuleBook,
    /// Orders inside the eligible garant days, bucketed for day-offs
    pub garant_orders: &'a [Order],
    pub work_entries: &'a [WorkScheduleEntry],
    pub balance: BalanceTotals,
    pub config: &'a Config,
    pub created_at: i64,
}

/// Garant figures for one courier
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GarantFigures {
    pub garant_days: i32,
    pub possible_day_offs: i32,
    pub actual_day_offs: i32,
    pub garant_price: Decimal,
    pub possible_garant_price: Decimal,
}

/// Guarantee pay: full days minus excess day-offs, minus late penalties, floored at 0
pub fn garant_figures(
    tariff: &GarantTariff,
    garant_days: i32,
    actual_day_offs: i32,
    late_count: i32,
    required_work_days: u32,
) -> GarantFigures {
    let required = i32::try_from(required_work_days).unwrap_or(i32::MAX);
    let possible_day_offs = (garant_days - required).max(0);
    let excess_day_offs = (actual_day_offs - possible_day_offs).max(0);
    let eligible_days = (garant_days - excess_day_offs).max(0);

    let amount = to_decimal(tariff.amount);
    let penalty = to_decimal(tariff.late_minus_sum) * Decimal::from(late_count);
    let garant_price = (amount * Decimal::from(eligible_days) - penalty).max(Decimal::ZERO);

    GarantFigures {
        garant_days,
        possible_day_offs,
        actual_day_offs,
        garant_price,
        possible_garant_price: amount * Decimal::from(garant_days),
    }
}

/// Late clock-ins started inside the window
pub fn late_count(entries: &[WorkScheduleEntry], window: TimeWindow) -> i32 {
    entries
        .iter()
        .filter(|e| e.late && window.contains(e.date_start))
        .count() as i32
}

pub fn settle(input: &SettlementInput<'_>) -> JobResult<CourierSettlement> {
    let courier = input.courier;
    let tz = input.config.timezone;

    let mut delivery_price = Decimal::ZERO;
    let mut bonus_total = Decimal::ZERO;
    for order in &input.metrics.finished_orders {
        let quote = input
            .rule_book
            .quote(courier, order, input.config.recompute_delivery_price, tz);
        delivery_price += quote.delivery_price;
        bonus_total += quote.bonus;
    }
    let earned = delivery_price + bonus_total;

    let mut late = late_count(input.work_entries, input.window);

    let garant = match input.tariff {
        Some(tariff) => {
            let order_start = courier
                .order_start_date
                .as_deref()
                .map(time::parse_date)
                .transpose()?;
            match GarantRange::eligible(input.period, order_start, input.as_of) {
                Some(range) => {
                    let cutoff = calendar::garant_cutoff(tariff, input.config.cutoff_time());
                    let day_offs = calendar::day_offs(range, input.garant_orders, cutoff, tz);
                    // Only eligible garant days carry a late penalty
                    late = late_count(input.work_entries, range.window(cutoff, tz));
                    garant_figures(
                        tariff,
                        range.len(),
                        day_offs,
                        late,
                        input.config.required_work_days,
                    )
                }
                None => GarantFigures::default(),
            }
        }
        None => GarantFigures::default(),
    };

    let garant_top_up = (garant.garant_price - earned).max(Decimal::ZERO);
    let balance_to_pay = to_decimal(input.balance.credited) - to_decimal(input.balance.withdrawn);

    Ok(CourierSettlement {
        courier_id: courier.id,
        period_start: input.window.start,
        period_end: input.window.end,
        orders_count: input.metrics.delivery_count,
        delivery_price: to_f64(delivery_price),
        bonus_total: to_f64(bonus_total),
        earned: to_f64(earned),
        garant_days: garant.garant_days,
        possible_day_offs: garant.possible_day_offs,
        actual_day_offs: garant.actual_day_offs,
        late_count: late,
        garant_price: to_f64(garant.garant_price),
        possible_garant_price: to_f64(garant.possible_garant_price),
        garant_top_up: to_f64(garant_top_up),
        balance_to_pay: to_f64(balance_to_pay),
        rating: input.metrics.average_score,
        position: input.ranking.position as i32,
        total_active_couriers: input.ranking.cohort_size as i32,
        created_at: input.created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{CourierStatus, DriveType, PriceBand, PricingKind, PricingRuleSet, WorkStatus};

    const TZ: chrono_tz::Tz = chrono_tz::Asia::Tashkent;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tariff() -> GarantTariff {
        GarantTariff {
            id: 1,
            name: "Daily".into(),
            amount: 100_000.0,
            late_minus_sum: 20_000.0,
            date: "00:00".into(),
        }
    }

    fn courier() -> Courier {
        Courier {
            id: 7,
            name: "Courier".into(),
            status: CourierStatus::Active,
            drive_type: DriveType::Car,
            terminal_id: 3,
            daily_garant_id: Some(1),
            order_start_date: None,
            is_online: false,
        }
    }

    fn order_on(id: i64, day: NaiveDate, distance: f64, delivery_price: Option<f64>) -> Order {
        let created_at = time::date_hms_to_millis(day, 12, 0, 0, TZ);
        Order {
            id,
            courier_id: 7,
            terminal_id: 3,
            organization_id: 1,
            order_status_id: 1,
            created_at,
            finished_date: Some(created_at + 40 * 60_000),
            score: Some(5),
            distance,
            delivery_price,
        }
    }

    fn delivery_set() -> PricingRuleSet {
        PricingRuleSet {
            id: 1,
            kind: PricingKind::Delivery,
            name: "Delivery".into(),
            organization_id: 1,
            terminal_ids: vec![],
            courier_id: None,
            drive_type: None,
            active_days: None,
            start_time: None,
            end_time: None,
            rules: vec![
                PriceBand {
                    from: 0.0,
                    to: 2.0,
                    price: 5000.0,
                },
                PriceBand {
                    from: 2.0,
                    to: 5.0,
                    price: 8000.0,
                },
            ],
            price_per_km: Some(2000.0),
            is_active: true,
        }
    }

    #[test]
    fn test_garant_figures() {
        // 30 days, 26 required → 4 allowed; 6 taken → 2 docked; 1 late
        let figures = garant_figures(&tariff(), 30, 6, 1, 26);
        assert_eq!(figures.possible_day_offs, 4);
        assert_eq!(figures.garant_price, Decimal::from(28 * 100_000 - 20_000));
        assert_eq!(figures.possible_garant_price, Decimal::from(3_000_000));
    }

    #[test]
    fn test_garant_price_floors_at_zero() {
        let figures = garant_figures(&tariff(), 3, 3, 50, 26);
        assert_eq!(figures.possible_day_offs, 0);
        assert_eq!(figures.garant_price, Decimal::ZERO);
    }

    #[test]
    fn test_late_count_respects_window() {
        let entry = |id, date_start, late| WorkScheduleEntry {
            id,
            courier_id: 7,
            terminal_id: 3,
            date_start,
            date_finish: None,
            current_status: WorkStatus::Closed,
            duration: None,
            late,
        };
        let entries = vec![entry(1, 10, true), entry(2, 20, false), entry(3, 500, true)];
        assert_eq!(late_count(&entries, TimeWindow { start: 0, end: 100 }), 1);
    }

    #[test]
    fn test_settle_period() {
        let config = Config::with_overrides(TZ, "00:00");
        let period = Period::month_of(date(2024, 4, 1));
        let window = period.window(TZ);

        // two worked days, stored price on one order, recomputed 6.4 km on the other
        let orders = vec![
            order_on(1, date(2024, 4, 1), 1.0, Some(7000.0)),
            order_on(2, date(2024, 4, 2), 6.4, None),
        ];
        let metrics = PeriodMetrics {
            delivery_count: 2,
            average_score: 5.0,
            average_delivery_time: 40.0,
            finished_orders: orders.clone(),
        };
        let rule_book = RuleBook {
            delivery: vec![delivery_set()],
            ..Default::default()
        };
        let tariff = tariff();
        let input = SettlementInput {
            courier: &courier(),
            period,
            window,
            as_of: date(2024, 4, 30),
            metrics: &metrics,
            ranking: RankingResult {
                position: 2,
                cohort_size: 5,
            },
            tariff: Some(&tariff),
            rule_book: &rule_book,
            garant_orders: &orders,
            work_entries: &[],
            balance: BalanceTotals {
                credited: 50_000.0,
                withdrawn: 20_000.0,
            },
            config: &config,
            created_at: 1,
        };

        let row = settle(&input).unwrap();
        assert_eq!(row.orders_count, 2);
        assert_eq!(row.delivery_price, 23_000.0);
        assert_eq!(row.earned, 23_000.0);
        assert_eq!(row.garant_days, 30);
        assert_eq!(row.possible_day_offs, 4);
        assert_eq!(row.actual_day_offs, 28);
        // 24 excess day-offs leave 6 paid days
        assert_eq!(row.garant_price, 600_000.0);
        assert_eq!(row.possible_garant_price, 3_000_000.0);
        assert_eq!(row.garant_top_up, 577_000.0);
        assert_eq!(row.balance_to_pay, 30_000.0);
        assert_eq!((row.position, row.total_active_couriers), (2, 5));
    }

    #[test]
    fn test_late_before_order_start_is_not_penalized() {
        let mut config = Config::with_overrides(TZ, "00:00");
        config.required_work_days = 0;
        let period = Period::month_of(date(2024, 4, 1));
        let mut c = courier();
        c.order_start_date = Some("2024-04-21".into());
        let late_on = |id, day| WorkScheduleEntry {
            id,
            courier_id: 7,
            terminal_id: 3,
            date_start: time::date_hms_to_millis(day, 9, 20, 0, TZ),
            date_finish: None,
            current_status: WorkStatus::Closed,
            duration: None,
            late: true,
        };
        let entries = vec![late_on(1, date(2024, 4, 5)), late_on(2, date(2024, 4, 25))];
        let metrics = PeriodMetrics::default();
        let rule_book = RuleBook::default();
        let tariff = tariff();
        let input = SettlementInput {
            courier: &c,
            period,
            window: period.window(TZ),
            as_of: date(2024, 4, 30),
            metrics: &metrics,
            ranking: RankingResult {
                position: 1,
                cohort_size: 1,
            },
            tariff: Some(&tariff),
            rule_book: &rule_book,
            garant_orders: &[],
            work_entries: &entries,
            balance: BalanceTotals::default(),
            config: &config,
            created_at: 1,
        };

        // April 21-30: ten garant days, all allowed off, one late clock-in
        let row = settle(&input).unwrap();
        assert_eq!(row.garant_days, 10);
        assert_eq!(row.late_count, 1);
        assert_eq!(row.garant_price, 980_000.0);
    }

    #[test]
    fn test_no_tariff_zero_garant() {
        let config = Config::with_overrides(TZ, "00:00");
        let period = Period::month_of(date(2024, 4, 1));
        let mut c = courier();
        c.daily_garant_id = None;
        let metrics = PeriodMetrics::default();
        let rule_book = RuleBook::default();
        let input = SettlementInput {
            courier: &c,
            period,
            window: period.window(TZ),
            as_of: date(2024, 4, 30),
            metrics: &metrics,
            ranking: RankingResult {
                position: 1,
                cohort_size: 1,
            },
            tariff: None,
            rule_book: &rule_book,
            garant_orders: &[],
            work_entries: &[],
            balance: BalanceTotals::default(),
            config: &config,
            created_at: 1,
        };
        let row = settle(&input).unwrap();
        assert_eq!(row.garant_days, 0);
        assert_eq!(row.garant_price, 0.0);
        assert_eq!(row.garant_top_up, 0.0);
    }

    #[test]
    fn test_bad_order_start_date_fails() {
        let config = Config::with_overrides(TZ, "00:00");
        let period = Period::month_of(date(2024, 4, 1));
        let mut c = courier();
        c.order_start_date = Some("04/01/2024".into());
        let metrics = PeriodMetrics::default();
        let rule_book = RuleBook::default();
        let tariff = tariff();
        let input = SettlementInput {
            courier: &c,
            period,
            window: period.window(TZ),
            as_of: date(2024, 4, 30),
            metrics: &metrics,
            ranking: RankingResult {
                position: 1,
                cohort_size: 1,
            },
            tariff: Some(&tariff),
            rule_book: &rule_book,
            garant_orders: &[],
            work_entries: &[],
            balance: BalanceTotals::default(),
            config: &config,
            created_at: 1,
        };
        assert!(settle(&input).is_err());
    }
}

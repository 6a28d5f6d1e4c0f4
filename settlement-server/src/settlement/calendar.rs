//! Garant-day calendar
//!
//! A garant day is the 24h bucket starting at the tariff's cutoff clock time
//! in the business timezone. With a 04:00 cutoff, an order placed at 02:30 on
//! the 11th belongs to the 10th.

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;
use shared::models::{GarantTariff, Order};

use crate::core::{Period, TimeWindow};
use crate::utils::time;

/// Cutoff of the tariff, or `fallback` when it is unset or unparseable
pub fn garant_cutoff(tariff: &GarantTariff, fallback: NaiveTime) -> NaiveTime {
    NaiveTime::parse_from_str(tariff.date.trim(), "%H:%M").unwrap_or_else(|_| {
        if !tariff.date.trim().is_empty() {
            tracing::warn!(tariff_id = tariff.id, date = %tariff.date, "Invalid garant cutoff, using business day cutoff");
        }
        fallback
    })
}

/// Inclusive range of garant days a courier is eligible for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GarantRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl GarantRange {
    /// `[max(period.start, order_start), min(period.end, as_of)]`, None when empty
    pub fn eligible(period: Period, order_start: Option<NaiveDate>, as_of: NaiveDate) -> Option<Self> {
        let start = order_start.map_or(period.start, |d| d.max(period.start));
        let end = period.end.min(as_of);
        (start <= end).then_some(Self { start, end })
    }

    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take_while(move |d| *d <= self.end)
    }

    pub fn len(self) -> i32 {
        (self.end - self.start).num_days() as i32 + 1
    }

    /// Millis covered by the range's garant days
    pub fn window(self, cutoff: NaiveTime, tz: Tz) -> TimeWindow {
        let after_end = self.end.succ_opt().unwrap_or(self.end);
        TimeWindow {
            start: time::date_cutoff_millis(self.start, cutoff, tz),
            end: time::date_cutoff_millis(after_end, cutoff, tz) - 1,
        }
    }
}

/// Garant days with at least one order, by `created_at`
pub fn worked_days(orders: &[Order], cutoff: NaiveTime, tz: Tz) -> BTreeSet<NaiveDate> {
    orders
        .iter()
        .map(|o| time::business_date_at(o.created_at, cutoff, tz))
        .collect()
}

/// Days in `range` without a single order
pub fn day_offs(range: GarantRange, orders: &[Order], cutoff: NaiveTime, tz: Tz) -> i32 {
    let worked = worked_days(orders, cutoff, tz);
    range.days().filter(|d| !worked.contains(d)).count() as i32
}

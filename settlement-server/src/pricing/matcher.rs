//! Pricing Rule Set Matcher
//!
//! Scope checks (organization, courier, terminal, drive type) and the
//! day-of-week / time-of-day window, evaluated at the order's `created_at`
//! in the business timezone.

use chrono::{Datelike, NaiveTime, Timelike};
use chrono_tz::Tz;
use shared::models::{Courier, PricingRuleSet};

use crate::utils::time::to_local;

/// How narrowly a rule set is targeted; lower wins
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Scope {
    Courier,
    Terminal,
    Organization,
}

pub fn scope_of(set: &PricingRuleSet) -> Scope {
    if set.courier_id.is_some() {
        Scope::Courier
    } else if !set.terminal_ids.is_empty() {
        Scope::Terminal
    } else {
        Scope::Organization
    }
}

/// Check organization, courier, terminal and drive type restrictions
pub fn matches_courier_scope(set: &PricingRuleSet, courier: &Courier, organization_id: i64) -> bool {
    if !set.is_active || set.organization_id != organization_id {
        return false;
    }
    // A courier-scoped set ignores its terminal list
    let in_scope = match set.courier_id {
        Some(target) => target == courier.id,
        None => set.terminal_ids.is_empty() || set.terminal_ids.contains(&courier.terminal_id),
    };
    if !in_scope {
        return false;
    }
    match set.drive_type_scope() {
        None => true,
        Some(Ok(drive_type)) => drive_type == courier.drive_type,
        Some(Err(e)) => {
            tracing::warn!(rule_set_id = set.id, error = %e, "Unknown drive type restriction");
            false
        }
    }
}

/// Check active days and the time window at `at` (Unix millis)
pub fn is_time_valid(set: &PricingRuleSet, at: i64, tz: Tz) -> bool {
    let local = to_local(at, tz);

    if let Some(ref days) = set.active_days
        && !days.is_empty()
    {
        // 0 = Sunday .. 6 = Saturday
        let current_day = local.weekday().num_days_from_sunday() as u8;
        if !days.contains(&current_day) {
            return false;
        }
    }

    if let (Some(start), Some(end)) = (&set.start_time, &set.end_time)
        && let (Ok(start_time), Ok(end_time)) = (
            NaiveTime::parse_from_str(start, "%H:%M"),
            NaiveTime::parse_from_str(end, "%H:%M"),
        )
    {
        let current_time =
            NaiveTime::from_hms_opt(local.hour(), local.minute(), 0).unwrap_or(NaiveTime::MIN);

        // Overnight ranges (e.g. 22:00 - 02:00)
        if start_time <= end_time {
            return current_time >= start_time && current_time <= end_time;
        }
        return current_time >= start_time || current_time <= end_time;
    }

    true
}

/// Best matching rule set for one order
///
/// Courier-scoped beats terminal-scoped beats organization-wide; ties go to
/// the lowest id.
pub fn select<'a>(
    sets: &'a [PricingRuleSet],
    courier: &Courier,
    organization_id: i64,
    at: i64,
    tz: Tz,
) -> Option<&'a PricingRuleSet> {
    sets.iter()
        .filter(|s| matches_courier_scope(s, courier, organization_id))
        .filter(|s| is_time_valid(s, at, tz))
        .min_by_key(|s| (scope_of(s), s.id))
}

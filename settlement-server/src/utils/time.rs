//! Time helpers - business timezone conversions
//!
//! Repositories only take `i64` Unix millis; every date ↔ timestamp
//! conversion goes through this module.

use chrono::{DateTime, NaiveDate, NaiveTime};
use chrono_tz::Tz;

use crate::core::error::{JobError, JobResult};

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> JobResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| JobError::Validation(format!("Invalid date format: {}", date)))
}

/// Date + h:m:s → Unix millis (business timezone)
///
/// DST gap fallback: if the local time does not exist, fall back to UTC.
pub fn date_hms_to_millis(date: NaiveDate, hour: u32, min: u32, sec: u32, tz: Tz) -> i64 {
    let time = NaiveTime::from_hms_opt(hour, min, sec).unwrap_or(NaiveTime::MIN);
    date_cutoff_millis(date, time, tz)
}

/// Start of day (00:00:00) → Unix millis (business timezone)
pub fn day_start_millis(date: NaiveDate, tz: Tz) -> i64 {
    date_hms_to_millis(date, 0, 0, 0, tz)
}

/// End of day → Unix millis of the next day's 00:00:00 (business timezone)
///
/// Callers use `< end` (exclusive) semantics.
pub fn day_end_millis(date: NaiveDate, tz: Tz) -> i64 {
    let next_day = date.succ_opt().unwrap_or(date);
    date_hms_to_millis(next_day, 0, 0, 0, tz)
}

/// Date + cutoff time → Unix millis (business timezone)
///
/// Used for garant-day boundaries.
pub fn date_cutoff_millis(date: NaiveDate, cutoff: NaiveTime, tz: Tz) -> i64 {
    let naive = date.and_time(cutoff);
    naive
        .and_local_timezone(tz)
        .latest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// Parse a cutoff time string (HH:MM), falling back to 00:00
pub fn parse_cutoff(cutoff: &str) -> NaiveTime {
    NaiveTime::parse_from_str(cutoff, "%H:%M").unwrap_or_else(|e| {
        tracing::warn!(
            "Failed to parse cutoff '{}': {}, falling back to 00:00",
            cutoff,
            e
        );
        NaiveTime::MIN
    })
}

/// Unix millis → local datetime (business timezone)
pub fn to_local(millis: i64, tz: Tz) -> DateTime<Tz> {
    DateTime::from_timestamp_millis(millis)
        .unwrap_or_default()
        .with_timezone(&tz)
}

/// Business date a timestamp belongs to
///
/// local time < cutoff → still the previous day's bucket
/// local time >= cutoff → today's bucket
pub fn business_date_at(millis: i64, cutoff: NaiveTime, tz: Tz) -> NaiveDate {
    let local = to_local(millis, tz);
    if local.time() < cutoff {
        (local - chrono::Duration::days(1)).date_naive()
    } else {
        local.date_naive()
    }
}

/// Current business date (business timezone)
pub fn current_business_date(cutoff: NaiveTime, tz: Tz) -> NaiveDate {
    business_date_at(shared::util::now_millis(), cutoff, tz)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TZ: Tz = chrono_tz::Asia::Tashkent; // UTC+5, no DST

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_bounds() {
        let d = date(2024, 3, 10);
        assert_eq!(day_end_millis(d, TZ) - day_start_millis(d, TZ), 86_400_000);
        // 2024-03-10 00:00 +05:00 == 2024-03-09 19:00 UTC
        assert_eq!(day_start_millis(d, TZ), 1_710_010_800_000);
    }

    #[test]
    fn test_business_date_respects_cutoff() {
        let cutoff = hm(4, 0);
        let d = date(2024, 3, 10);
        let before = date_cutoff_millis(d, hm(3, 59), TZ);
        let after = date_cutoff_millis(d, hm(4, 0), TZ);
        assert_eq!(business_date_at(before, cutoff, TZ), date(2024, 3, 9));
        assert_eq!(business_date_at(after, cutoff, TZ), d);
    }

    #[test]
    fn test_midnight_cutoff_is_calendar_day() {
        let d = date(2024, 3, 10);
        let late_evening = date_cutoff_millis(d, hm(23, 59), TZ);
        assert_eq!(business_date_at(late_evening, NaiveTime::MIN, TZ), d);
    }

    #[test]
    fn test_parse_cutoff_fallback() {
        assert_eq!(parse_cutoff("06:30"), hm(6, 30));
        assert_eq!(parse_cutoff("garbage"), NaiveTime::MIN);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-02-29").unwrap(), date(2024, 2, 29));
        assert!(parse_date("2024/02/29").is_err());
    }
}

//! Settlement periods (calendar months) and their time windows

use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use super::error::{JobError, JobResult};
use crate::utils::time;

/// Inclusive `[start, end]` window in Unix millis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: i64,
    pub end: i64,
}

impl TimeWindow {
    pub fn contains(&self, millis: i64) -> bool {
        millis >= self.start && millis <= self.end
    }
}

/// Calendar month in the business timezone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    /// First day of the month
    pub start: NaiveDate,
    /// Last day of the month
    pub end: NaiveDate,
}

impl Period {
    /// The month containing `date`
    pub fn month_of(date: NaiveDate) -> Self {
        let start = date.with_day(1).unwrap_or(date);
        let next_month = if start.month() == 12 {
            NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(start.year(), start.month() + 1, 1)
        };
        let end = next_month.and_then(|d| d.pred_opt()).unwrap_or(start);
        Self { start, end }
    }

    /// Parse `YYYY-MM`
    pub fn parse_month(month: &str) -> JobResult<Self> {
        let date = NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d")
            .map_err(|_| JobError::InvalidPeriod(format!("expected YYYY-MM, got {month}")))?;
        Ok(Self::month_of(date))
    }

    /// The month before this one
    pub fn previous(&self) -> Self {
        Self::month_of(self.start.pred_opt().unwrap_or(self.start))
    }

    /// Inclusive window from the first day's 00:00 to the last day's final millisecond
    pub fn window(&self, tz: Tz) -> TimeWindow {
        TimeWindow {
            start: time::day_start_millis(self.start, tz),
            end: time::day_end_millis(self.end, tz) - 1,
        }
    }

    pub fn label(&self) -> String {
        self.start.format("%Y-%m").to_string()
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

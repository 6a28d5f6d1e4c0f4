//! Command line
//!
//! ```text
//! settlement-server run <close-shifts|performance|settlement|all> [YYYY-MM]
//! settlement-server serve
//! ```

use std::fmt;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

use crate::core::Period;

#[derive(Debug, Parser)]
#[command(name = "settlement-server")]
#[command(about = "Courier performance ranking and guarantee settlement")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Run one job now and exit (for an external cron)
    Run {
        #[arg(value_enum)]
        job: Job,

        /// Month to process; defaults to the month of yesterday, or the
        /// previous month for settlements
        #[arg(value_name = "YYYY-MM", value_parser = parse_month)]
        month: Option<Period>,
    },
    /// Run every job at the daily business-day cutoff until interrupted
    Serve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Job {
    /// Force-close work-schedule entries left open from previous days
    CloseShifts,
    /// Rank couriers inside their terminal group
    Performance,
    /// Settle guarantee, bonus and balance figures
    Settlement,
    /// All of the above, in that order
    All,
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_possible_value() {
            Some(value) => f.write_str(value.get_name()),
            None => Ok(()),
        }
    }
}

fn parse_month(month: &str) -> Result<Period, String> {
    Period::parse_month(month).map_err(|e| e.to_string())
}

/// Period a one-shot run targets
///
/// An explicit month wins; otherwise the month of yesterday's business date
/// (the month still being ranked), or the previous month for settlements.
pub fn resolve_period(job: Job, month: Option<Period>, today: NaiveDate) -> Period {
    if let Some(month) = month {
        return month;
    }
    match job {
        Job::Settlement => Period::month_of(today).previous(),
        _ => Period::month_of(today.pred_opt().unwrap_or(today)),
    }
}

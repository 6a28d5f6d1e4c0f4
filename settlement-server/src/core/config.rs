use chrono_tz::Tz;

use super::error::{JobError, JobResult};

/// Settlement engine configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | DATABASE_URL | (required) | Postgres connection URL |
/// | ENVIRONMENT | development | development / staging / production |
/// | TIMEZONE | Asia/Tashkent | Business timezone (IANA name) |
/// | BUSINESS_DAY_CUTOFF | 00:00 | Daily boundary for shift closing and garant days |
/// | GARANT_REQUIRED_WORK_DAYS | 26 | Work days expected per period |
/// | COURIER_TIMEOUT_SECS | 60 | Per-courier computation limit |
/// | RECOMPUTE_DELIVERY_PRICE | false | Reprice every order from its distance |
/// | DB_MAX_CONNECTIONS | 5 | Pool size |
/// | LOG_LEVEL | info | Log level when RUST_LOG is unset |
/// | LOG_DIR | - | Rolling log file directory |
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// Environment: development | staging | production
    pub environment: String,
    /// Business timezone
    pub timezone: Tz,
    /// Business day boundary (HH:MM)
    pub business_day_cutoff: String,
    /// Work days a courier is expected to put in per period; the rest are allowed day-offs
    pub required_work_days: u32,
    pub courier_timeout_secs: u64,
    /// Ignore stored delivery prices and reprice from distance
    pub recompute_delivery_price: bool,
    pub db_max_connections: u32,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> JobResult<Self> {
        let timezone_name = std::env::var("TIMEZONE").unwrap_or_else(|_| "Asia/Tashkent".into());
        let timezone: Tz = timezone_name
            .parse()
            .map_err(|_| JobError::Config(format!("Unknown TIMEZONE: {timezone_name}")))?;

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| JobError::Config("DATABASE_URL must be set".into()))?,
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            timezone,
            business_day_cutoff: std::env::var("BUSINESS_DAY_CUTOFF")
                .unwrap_or_else(|_| "00:00".into()),
            required_work_days: std::env::var("GARANT_REQUIRED_WORK_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(26),
            courier_timeout_secs: std::env::var("COURIER_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            recompute_delivery_price: std::env::var("RECOMPUTE_DELIVERY_PRICE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
        })
    }

    /// Defaults without touching the environment
    ///
    /// Used by tests and in-memory dry runs.
    pub fn with_overrides(timezone: Tz, business_day_cutoff: impl Into<String>) -> Self {
        Self {
            database_url: String::new(),
            environment: "development".into(),
            timezone,
            business_day_cutoff: business_day_cutoff.into(),
            required_work_days: 26,
            courier_timeout_secs: 60,
            recompute_delivery_price: false,
            db_max_connections: 1,
            log_level: "info".into(),
            log_dir: None,
        }
    }

    /// Parsed business day cutoff
    pub fn cutoff_time(&self) -> chrono::NaiveTime {
        crate::utils::time::parse_cutoff(&self.business_day_cutoff)
    }
}

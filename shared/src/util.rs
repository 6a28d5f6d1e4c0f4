/// Current UTC timestamp (milliseconds)
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Milliseconds in one minute
pub const MILLIS_PER_MINUTE: i64 = 60_000;

/// Elapsed minutes between two Unix-millis timestamps (fractional)
pub fn minutes_between(start: i64, end: i64) -> f64 {
    (end - start) as f64 / MILLIS_PER_MINUTE as f64
}

//! Work Schedule Model (courier attendance)

use serde::{Deserialize, Serialize};

use super::text_enum;

text_enum! {
    /// Attendance entry status: `open → closed`
    WorkStatus {
        Open => "open",
        Closed => "closed",
    }
}

/// Attendance record - one courier shift
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct WorkScheduleEntry {
    pub id: i64,
    pub courier_id: i64,
    pub terminal_id: i64,
    /// Clock-in (Unix millis)
    pub date_start: i64,
    /// Clock-out (Unix millis), None while the shift is open
    pub date_finish: Option<i64>,
    #[cfg_attr(feature = "db", sqlx(try_from = "String"))]
    pub current_status: WorkStatus,
    /// Shift length in seconds, set when the entry closes
    pub duration: Option<i64>,
    /// Clock-in happened after the scheduled start
    #[serde(default)]
    pub late: bool,
}

impl WorkScheduleEntry {
    pub fn is_open(&self) -> bool {
        self.current_status == WorkStatus::Open
    }
}

//! Courier Model

use serde::{Deserialize, Serialize};

use super::text_enum;

text_enum! {
    /// Courier account status
    CourierStatus {
        Active => "active",
        Inactive => "inactive",
        Blocked => "blocked",
    }
}

text_enum! {
    /// How the courier moves between pickup and drop-off
    DriveType {
        Foot => "foot",
        Bike => "bike",
        Scooter => "scooter",
        Car => "car",
    }
}

/// Courier entity (managed by admin CRUD, read-only to the engine)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Courier {
    pub id: i64,
    pub name: String,
    #[cfg_attr(feature = "db", sqlx(try_from = "String"))]
    pub status: CourierStatus,
    #[cfg_attr(feature = "db", sqlx(try_from = "String"))]
    pub drive_type: DriveType,
    /// Terminal the courier is assigned to
    pub terminal_id: i64,
    /// Daily guarantee tariff
    pub daily_garant_id: Option<i64>,
    /// Guarantee eligibility floor (YYYY-MM-DD)
    pub order_start_date: Option<String>,
    #[serde(default)]
    pub is_online: bool,
}

/// Courier selection for a batch run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourierFilter {
    /// Only couriers in this status (None = any)
    pub status: Option<CourierStatus>,
    /// Only couriers assigned to one of these terminals (empty = any)
    #[serde(default)]
    pub terminal_ids: Vec<i64>,
    /// Only couriers with a daily guarantee tariff
    #[serde(default)]
    pub with_garant: bool,
}

impl CourierFilter {
    /// Active couriers of any terminal
    pub fn active() -> Self {
        Self {
            status: Some(CourierStatus::Active),
            ..Default::default()
        }
    }

    pub fn matches(&self, courier: &Courier) -> bool {
        if let Some(status) = self.status
            && courier.status != status
        {
            return false;
        }
        if !self.terminal_ids.is_empty() && !self.terminal_ids.contains(&courier.terminal_id) {
            return false;
        }
        !self.with_garant || courier.daily_garant_id.is_some()
    }
}

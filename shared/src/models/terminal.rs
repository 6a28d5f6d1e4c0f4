//! Terminal Model (physical branch)

use serde::{Deserialize, Serialize};

/// Terminal entity
///
/// `linked_terminal_id` points at a hub terminal; the hub plus every terminal
/// pointing at it form one ranking cohort. Links are one level deep.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Terminal {
    pub id: i64,
    pub name: String,
    pub organization_id: i64,
    pub linked_terminal_id: Option<i64>,
}

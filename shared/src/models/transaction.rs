//! Courier Wallet Transaction Model

use serde::{Deserialize, Serialize};

use super::text_enum;

text_enum! {
    /// Wallet movement direction
    TransactionKind {
        /// Earned by the courier (order, bonus, garant top-up)
        Credit => "credit",
        /// Paid out by a manager
        Withdrawal => "withdrawal",
    }
}

text_enum! {
    TransactionStatus {
        Pending => "pending",
        Success => "success",
    }
}

/// Wallet transaction row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BalanceTransaction {
    pub id: i64,
    pub courier_id: i64,
    pub amount: f64,
    #[cfg_attr(feature = "db", sqlx(try_from = "String"))]
    pub kind: TransactionKind,
    #[cfg_attr(feature = "db", sqlx(try_from = "String"))]
    pub status: TransactionStatus,
    pub created_at: i64,
}

/// Wallet sums for one courier
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BalanceTotals {
    /// Sum of credit transactions
    pub credited: f64,
    /// Sum of withdrawals already paid out
    pub withdrawn: f64,
}

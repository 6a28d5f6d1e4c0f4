//! Courier Wallet Transaction Repository

use shared::models::BalanceTotals;
use sqlx::PgPool;

use crate::db::StoreResult;

pub async fn totals(pool: &PgPool, courier_id: i64, until: i64) -> StoreResult<BalanceTotals> {
    let totals = sqlx::query_as::<_, BalanceTotals>(
        r#"
        SELECT
            COALESCE(SUM(amount) FILTER (WHERE kind = 'credit'), 0)::FLOAT8 AS credited,
            COALESCE(SUM(amount) FILTER (WHERE kind = 'withdrawal' AND status = 'success'), 0)::FLOAT8 AS withdrawn
        FROM courier_transactions
        WHERE courier_id = $1 AND created_at <= $2
        "#,
    )
    .bind(courier_id)
    .bind(until)
    .fetch_one(pool)
    .await?;
    Ok(totals)
}

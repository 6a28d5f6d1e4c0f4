//! Courier Settlement Repository

use shared::models::CourierSettlement;
use sqlx::PgPool;

use crate::db::StoreResult;

/// Delete-then-insert in one transaction
pub async fn replace(pool: &PgPool, row: &CourierSettlement) -> StoreResult<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM courier_settlements WHERE courier_id = $1 AND period_start = $2")
        .bind(row.courier_id)
        .bind(row.period_start)
        .execute(&mut *tx)
        .await?;

    sqlx::query(
        r#"
        INSERT INTO courier_settlements (
            courier_id, period_start, period_end, orders_count, delivery_price, bonus_total,
            earned, garant_days, possible_day_offs, actual_day_offs, late_count,
            garant_price, possible_garant_price, garant_top_up, balance_to_pay,
            rating, position, total_active_couriers, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
        "#,
    )
    .bind(row.courier_id)
    .bind(row.period_start)
    .bind(row.period_end)
    .bind(row.orders_count)
    .bind(row.delivery_price)
    .bind(row.bonus_total)
    .bind(row.earned)
    .bind(row.garant_days)
    .bind(row.possible_day_offs)
    .bind(row.actual_day_offs)
    .bind(row.late_count)
    .bind(row.garant_price)
    .bind(row.possible_garant_price)
    .bind(row.garant_top_up)
    .bind(row.balance_to_pay)
    .bind(row.rating)
    .bind(row.position)
    .bind(row.total_active_couriers)
    .bind(row.created_at)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}

pub async fn find_by_period(pool: &PgPool, period_start: i64) -> StoreResult<Vec<CourierSettlement>> {
    let rows = sqlx::query_as::<_, CourierSettlement>(
        r#"
        SELECT courier_id, period_start, period_end, orders_count, delivery_price, bonus_total,
            earned, garant_days, possible_day_offs, actual_day_offs, late_count,
            garant_price, possible_garant_price, garant_top_up, balance_to_pay,
            rating, position, total_active_couriers, created_at
        FROM courier_settlements
        WHERE period_start = $1
        ORDER BY courier_id
        "#,
    )
    .bind(period_start)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

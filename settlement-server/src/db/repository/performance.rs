//! Courier Performance Repository

use shared::models::CourierPerformance;
use sqlx::PgPool;

use crate::db::StoreResult;

/// Delete-then-insert in one transaction
pub async fn replace(pool: &PgPool, row: &CourierPerformance) -> StoreResult<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM courier_performance WHERE courier_id = $1 AND period_start = $2")
        .bind(row.courier_id)
        .bind(row.period_start)
        .execute(&mut *tx)
        .await?;

    sqlx::query(
        r#"
        INSERT INTO courier_performance (
            courier_id, period_start, rating, delivery_count, delivery_average_time,
            position, total_active_couriers, terminal_keys
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(row.courier_id)
    .bind(row.period_start)
    .bind(row.rating)
    .bind(row.delivery_count)
    .bind(row.delivery_average_time)
    .bind(row.position)
    .bind(row.total_active_couriers)
    .bind(&row.terminal_keys)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}

pub async fn find_by_period(pool: &PgPool, period_start: i64) -> StoreResult<Vec<CourierPerformance>> {
    let rows = sqlx::query_as::<_, CourierPerformance>(
        r#"
        SELECT courier_id, period_start, rating, delivery_count, delivery_average_time,
            position, total_active_couriers, terminal_keys
        FROM courier_performance
        WHERE period_start = $1
        ORDER BY courier_id
        "#,
    )
    .bind(period_start)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

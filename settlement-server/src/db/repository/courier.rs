//! Courier Repository

use shared::models::{Courier, CourierFilter};
use sqlx::PgPool;

use crate::db::StoreResult;

pub async fn find_by_filter(pool: &PgPool, filter: &CourierFilter) -> StoreResult<Vec<Courier>> {
    let status = filter.status.map(|s| s.as_str());
    let couriers = sqlx::query_as::<_, Courier>(
        r#"
        SELECT id, name, status, drive_type, terminal_id, daily_garant_id, order_start_date, is_online
        FROM couriers
        WHERE ($1::TEXT IS NULL OR status = $1)
            AND (CARDINALITY($2::BIGINT[]) = 0 OR terminal_id = ANY($2))
            AND (NOT $3 OR daily_garant_id IS NOT NULL)
        ORDER BY id
        "#,
    )
    .bind(status)
    .bind(&filter.terminal_ids)
    .bind(filter.with_garant)
    .fetch_all(pool)
    .await?;
    Ok(couriers)
}

pub async fn set_online(pool: &PgPool, courier_id: i64, is_online: bool) -> StoreResult<()> {
    sqlx::query("UPDATE couriers SET is_online = $1 WHERE id = $2")
        .bind(is_online)
        .bind(courier_id)
        .execute(pool)
        .await?;
    Ok(())
}

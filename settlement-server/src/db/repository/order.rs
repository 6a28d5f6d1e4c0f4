//! Order Repository
//!
//! Aggregation reads. Every query applies the same courier / terminal /
//! window / status filter so no metric counts an order the others skip.

use shared::models::{Order, OrderQuery, OrderStatus};
use sqlx::PgPool;

use crate::db::StoreResult;

pub async fn find_statuses(pool: &PgPool) -> StoreResult<Vec<OrderStatus>> {
    let statuses = sqlx::query_as::<_, OrderStatus>(
        "SELECT id, organization_id, name, cancel, finish, waiting FROM order_status ORDER BY id",
    )
    .fetch_all(pool)
    .await?;
    Ok(statuses)
}

pub async fn count(pool: &PgPool, query: &OrderQuery) -> StoreResult<i64> {
    let count: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM orders
        WHERE courier_id = $1
            AND terminal_id = ANY($2)
            AND created_at BETWEEN $3 AND $4
            AND order_status_id = ANY($5)
        "#,
    )
    .bind(query.courier_id)
    .bind(&query.terminal_ids)
    .bind(query.start)
    .bind(query.end)
    .bind(&query.status_ids)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

pub async fn average_score(pool: &PgPool, query: &OrderQuery) -> StoreResult<f64> {
    let avg: f64 = sqlx::query_scalar(
        r#"
        SELECT COALESCE(AVG(COALESCE(score, 0))::FLOAT8, 0::FLOAT8)
        FROM orders
        WHERE courier_id = $1
            AND terminal_id = ANY($2)
            AND created_at BETWEEN $3 AND $4
            AND order_status_id = ANY($5)
            AND finished_date IS NOT NULL
        "#,
    )
    .bind(query.courier_id)
    .bind(&query.terminal_ids)
    .bind(query.start)
    .bind(query.end)
    .bind(&query.status_ids)
    .fetch_one(pool)
    .await?;
    Ok(avg)
}

pub async fn find_finished(pool: &PgPool, query: &OrderQuery) -> StoreResult<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(
        r#"
        SELECT id, courier_id, terminal_id, organization_id, order_status_id,
            created_at, finished_date, score, distance, delivery_price
        FROM orders
        WHERE courier_id = $1
            AND terminal_id = ANY($2)
            AND created_at BETWEEN $3 AND $4
            AND order_status_id = ANY($5)
            AND finished_date IS NOT NULL
        ORDER BY created_at
        "#,
    )
    .bind(query.courier_id)
    .bind(&query.terminal_ids)
    .bind(query.start)
    .bind(query.end)
    .bind(&query.status_ids)
    .fetch_all(pool)
    .await?;
    Ok(orders)
}

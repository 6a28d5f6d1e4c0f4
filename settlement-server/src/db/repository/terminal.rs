//! Terminal Repository

use shared::models::Terminal;
use sqlx::PgPool;

use crate::db::StoreResult;

pub async fn find_by_id(pool: &PgPool, id: i64) -> StoreResult<Option<Terminal>> {
    let terminal = sqlx::query_as::<_, Terminal>(
        "SELECT id, name, organization_id, linked_terminal_id FROM terminals WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(terminal)
}

pub async fn find_linked_to(pool: &PgPool, hub_id: i64) -> StoreResult<Vec<Terminal>> {
    let terminals = sqlx::query_as::<_, Terminal>(
        "SELECT id, name, organization_id, linked_terminal_id FROM terminals WHERE linked_terminal_id = $1 ORDER BY id",
    )
    .bind(hub_id)
    .fetch_all(pool)
    .await?;
    Ok(terminals)
}

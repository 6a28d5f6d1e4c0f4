//! Work Schedule Repository

use shared::models::WorkScheduleEntry;
use sqlx::PgPool;

use crate::db::StoreResult;

pub async fn find_open_before(pool: &PgPool, before: i64) -> StoreResult<Vec<WorkScheduleEntry>> {
    let entries = sqlx::query_as::<_, WorkScheduleEntry>(
        "SELECT id, courier_id, terminal_id, date_start, date_finish, current_status, duration, late FROM work_schedule_entries WHERE current_status = 'open' AND date_start < $1 ORDER BY date_start",
    )
    .bind(before)
    .fetch_all(pool)
    .await?;
    Ok(entries)
}

pub async fn find_by_courier(
    pool: &PgPool,
    courier_id: i64,
    start: i64,
    end: i64,
) -> StoreResult<Vec<WorkScheduleEntry>> {
    let entries = sqlx::query_as::<_, WorkScheduleEntry>(
        "SELECT id, courier_id, terminal_id, date_start, date_finish, current_status, duration, late FROM work_schedule_entries WHERE courier_id = $1 AND date_start BETWEEN $2 AND $3 ORDER BY date_start",
    )
    .bind(courier_id)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;
    Ok(entries)
}

/// Close an open entry; already-closed rows are left untouched
pub async fn close(pool: &PgPool, id: i64, date_finish: i64, duration: i64) -> StoreResult<bool> {
    let rows = sqlx::query(
        "UPDATE work_schedule_entries SET current_status = 'closed', date_finish = $1, duration = $2 WHERE id = $3 AND current_status = 'open'",
    )
    .bind(date_finish)
    .bind(duration)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

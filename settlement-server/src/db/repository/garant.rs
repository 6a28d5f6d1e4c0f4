//! Daily Guarantee Tariff Repository

use shared::models::GarantTariff;
use sqlx::PgPool;

use crate::db::StoreResult;

pub async fn find_by_id(pool: &PgPool, id: i64) -> StoreResult<Option<GarantTariff>> {
    let tariff = sqlx::query_as::<_, GarantTariff>(
        "SELECT id, name, amount, late_minus_sum, date FROM daily_garant WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(tariff)
}

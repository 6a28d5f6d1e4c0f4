//! Pricing Rule Set Repository

use shared::models::{PricingKind, PricingRuleSet};
use sqlx::PgPool;

use crate::db::StoreResult;

pub async fn find_active(
    pool: &PgPool,
    organization_id: i64,
    kind: PricingKind,
) -> StoreResult<Vec<PricingRuleSet>> {
    let sets = sqlx::query_as::<_, PricingRuleSet>(
        r#"
        SELECT id, kind, name, organization_id, terminal_ids, courier_id, drive_type,
            active_days, start_time, end_time, rules, price_per_km, is_active
        FROM pricing_rule_sets
        WHERE organization_id = $1 AND kind = $2 AND is_active
        ORDER BY id
        "#,
    )
    .bind(organization_id)
    .bind(kind.as_str())
    .fetch_all(pool)
    .await?;
    Ok(sets)
}

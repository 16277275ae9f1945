//! Repository for the `promo_modules` table.

use sqlx::PgPool;
use yboard_core::types::DbId;

use crate::models::promo_module::{
    CreatePromoModule, PromoModule, PromoModuleDetail, UpdatePromoModule,
};

const COLUMNS: &str = "id, promo_id, module_id, workload, created_at, updated_at";

/// Join used by every detailed query. Sorted for display: level, specialty,
/// then module name.
const DETAIL_SELECT: &str = "SELECT pm.id, pm.promo_id, p.level, p.specialty, \
                                    pm.module_id, m.name AS module_name, pm.workload \
                             FROM promo_modules pm \
                             JOIN promos p ON p.id = pm.promo_id \
                             JOIN modules m ON m.id = pm.module_id";

/// Provides CRUD operations for promo modules.
pub struct PromoModuleRepo;

impl PromoModuleRepo {
    /// Attach a module to a promo. Fails on `uq_promo_modules_promo_module`
    /// if the pair is already attached.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePromoModule,
    ) -> Result<PromoModule, sqlx::Error> {
        let query = format!(
            "INSERT INTO promo_modules (promo_id, module_id, workload)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PromoModule>(&query)
            .bind(input.promo_id)
            .bind(input.module_id)
            .bind(input.workload)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PromoModule>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM promo_modules WHERE id = $1");
        sqlx::query_as::<_, PromoModule>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_detailed(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PromoModuleDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE pm.id = $1");
        sqlx::query_as::<_, PromoModuleDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Every promo module with its promo and module names, in display order.
    pub async fn list_detailed(pool: &PgPool) -> Result<Vec<PromoModuleDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} ORDER BY p.level, p.specialty, m.name");
        sqlx::query_as::<_, PromoModuleDetail>(&query)
            .fetch_all(pool)
            .await
    }

    /// Change the base workload. Returns `None` if the row does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePromoModule,
    ) -> Result<Option<PromoModule>, sqlx::Error> {
        let query = format!(
            "UPDATE promo_modules SET workload = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PromoModule>(&query)
            .bind(id)
            .bind(input.workload)
            .fetch_optional(pool)
            .await
    }

    /// Delete a promo module and, by cascade, all relations on it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM promo_modules WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

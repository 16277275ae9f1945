//! Repository for the `promos` table.

use sqlx::PgPool;
use yboard_core::types::DbId;

use crate::models::promo::{CreatePromo, Promo, UpdatePromo};

const COLUMNS: &str = "id, level, specialty, created_at, updated_at";

/// Provides CRUD operations for promos.
pub struct PromoRepo;

impl PromoRepo {
    /// Insert a new promo. Fails on `uq_promos_level_specialty` if the
    /// level/specialty pair already exists.
    pub async fn create(pool: &PgPool, input: &CreatePromo) -> Result<Promo, sqlx::Error> {
        let query = format!(
            "INSERT INTO promos (level, specialty) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Promo>(&query)
            .bind(input.level.as_str())
            .bind(input.specialty.trim())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Promo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM promos WHERE id = $1");
        sqlx::query_as::<_, Promo>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all promos by level, then specialty.
    pub async fn list(pool: &PgPool) -> Result<Vec<Promo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM promos ORDER BY level, specialty");
        sqlx::query_as::<_, Promo>(&query).fetch_all(pool).await
    }

    /// Update a promo. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePromo,
    ) -> Result<Option<Promo>, sqlx::Error> {
        let query = format!(
            "UPDATE promos SET
                level = COALESCE($2, level),
                specialty = COALESCE($3, specialty)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Promo>(&query)
            .bind(id)
            .bind(input.level.map(|l| l.as_str()))
            .bind(input.specialty.as_deref().map(str::trim))
            .fetch_optional(pool)
            .await
    }

    /// Delete a promo and, by cascade, its promo modules and their relations.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM promos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

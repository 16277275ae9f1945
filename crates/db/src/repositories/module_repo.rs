//! Repository for the `modules` table.

use sqlx::PgPool;
use yboard_core::types::DbId;

use crate::models::module::{CreateModule, Module};

const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides CRUD operations for modules.
pub struct ModuleRepo;

impl ModuleRepo {
    pub async fn create(pool: &PgPool, input: &CreateModule) -> Result<Module, sqlx::Error> {
        let query = format!("INSERT INTO modules (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Module>(&query)
            .bind(input.name.trim())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Module>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM modules WHERE id = $1");
        sqlx::query_as::<_, Module>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Module>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM modules ORDER BY name");
        sqlx::query_as::<_, Module>(&query).fetch_all(pool).await
    }

    /// Rename a module. Returns `None` if it does not exist.
    pub async fn rename(
        pool: &PgPool,
        id: DbId,
        input: &CreateModule,
    ) -> Result<Option<Module>, sqlx::Error> {
        let query = format!("UPDATE modules SET name = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Module>(&query)
            .bind(id)
            .bind(input.name.trim())
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM modules WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

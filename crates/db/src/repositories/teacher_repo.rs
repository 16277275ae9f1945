//! Repository for the `teachers` table.

use std::collections::HashMap;

use sqlx::PgPool;
use yboard_core::types::DbId;

use crate::models::teacher::{CreateTeacher, Teacher, UpdateTeacher};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, rate, status, diploma, email, phone, cv, created_at, updated_at";

/// Provides CRUD operations for teachers.
pub struct TeacherRepo;

impl TeacherRepo {
    /// Insert a new teacher, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTeacher) -> Result<Teacher, sqlx::Error> {
        let query = format!(
            "INSERT INTO teachers (name, rate, status, diploma, email, phone)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Teacher>(&query)
            .bind(input.name.trim())
            .bind(input.rate)
            .bind(&input.status)
            .bind(&input.diploma)
            .bind(&input.email)
            .bind(&input.phone)
            .fetch_one(pool)
            .await
    }

    /// Find a teacher by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Teacher>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teachers WHERE id = $1");
        sqlx::query_as::<_, Teacher>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all teachers ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Teacher>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teachers ORDER BY name, id");
        sqlx::query_as::<_, Teacher>(&query).fetch_all(pool).await
    }

    /// Default hourly rate of every teacher, keyed by teacher ID.
    pub async fn default_rates(pool: &PgPool) -> Result<HashMap<DbId, Option<f64>>, sqlx::Error> {
        let rows = sqlx::query_as::<_, (DbId, Option<f64>)>("SELECT id, rate FROM teachers")
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().collect())
    }

    /// Update a teacher. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTeacher,
    ) -> Result<Option<Teacher>, sqlx::Error> {
        let query = format!(
            "UPDATE teachers SET
                name = COALESCE($2, name),
                rate = COALESCE($3, rate),
                status = COALESCE($4, status),
                diploma = COALESCE($5, diploma),
                email = COALESCE($6, email),
                phone = COALESCE($7, phone)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Teacher>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(input.rate)
            .bind(&input.status)
            .bind(&input.diploma)
            .bind(&input.email)
            .bind(&input.phone)
            .fetch_optional(pool)
            .await
    }

    /// Set or clear the stored CV filename.
    ///
    /// Returns the previous filename so the caller can remove the old file.
    /// Returns `None` if the teacher does not exist.
    pub async fn set_cv(
        pool: &PgPool,
        id: DbId,
        cv: Option<&str>,
    ) -> Result<Option<Option<String>>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let previous: Option<(Option<String>,)> =
            sqlx::query_as("SELECT cv FROM teachers WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((previous,)) = previous else {
            return Ok(None);
        };

        sqlx::query("UPDATE teachers SET cv = $2 WHERE id = $1")
            .bind(id)
            .bind(cv)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(Some(previous))
    }

    /// Delete a teacher and, by cascade, all of their relations.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM teachers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

//! PostgreSQL implementations of the core store traits.

use async_trait::async_trait;
use sqlx::PgPool;
use yboard_core::error::CoreError;
use yboard_core::relation::{NewRelation, Relation, RelationKey, RelationPatch, RelationState};
use yboard_core::relation_store::RelationStore;
use yboard_core::selection::PreferenceStore;
use yboard_core::types::DbId;

use crate::models::relation::RelationRow;
use crate::repositories::{PreferenceRepo, RelationRepo};

/// Translate a database error into the domain error the store contract
/// promises.
///
/// - `23505` unique violation -> `Conflict`
/// - `23503` foreign-key violation -> `Validation` (unknown teacher or promo module)
/// - `23514` check violation -> `Validation`
/// - anything else -> `Internal`
pub fn map_db_error(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        let constraint = db_err.constraint().unwrap_or("unknown");
        match db_err.code().as_deref() {
            Some("23505") => {
                return CoreError::Conflict(format!("Duplicate value violates {constraint}"));
            }
            Some("23503") => {
                return CoreError::Validation(format!(
                    "Referenced record does not exist ({constraint})"
                ));
            }
            Some("23514") => {
                return CoreError::Validation(format!("Value violates {constraint}"));
            }
            _ => {}
        }
    }
    tracing::error!(error = %err, "Relation store database error");
    CoreError::Internal(err.to_string())
}

fn into_relations(rows: Vec<RelationRow>) -> Result<Vec<Relation>, CoreError> {
    rows.into_iter().map(Relation::try_from).collect()
}

// ---------------------------------------------------------------------------
// Relations
// ---------------------------------------------------------------------------

/// Relation store over the `teacher_relations` table.
#[derive(Debug, Clone)]
pub struct PgRelationStore {
    pool: PgPool,
}

impl PgRelationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RelationStore for PgRelationStore {
    async fn find(&self, key: &RelationKey) -> Result<Option<Relation>, CoreError> {
        RelationRepo::find(&self.pool, key)
            .await
            .map_err(map_db_error)?
            .map(Relation::try_from)
            .transpose()
    }

    async fn list_by_state(&self, state: RelationState) -> Result<Vec<Relation>, CoreError> {
        let rows = RelationRepo::list_by_state(&self.pool, state)
            .await
            .map_err(map_db_error)?;
        into_relations(rows)
    }

    async fn list_for_promo_module(
        &self,
        promo_module_id: DbId,
    ) -> Result<Vec<Relation>, CoreError> {
        let rows = RelationRepo::list_for_promo_module(&self.pool, promo_module_id)
            .await
            .map_err(map_db_error)?;
        into_relations(rows)
    }

    async fn list_for_teacher(&self, teacher_id: DbId) -> Result<Vec<Relation>, CoreError> {
        let rows = RelationRepo::list_for_teacher(&self.pool, teacher_id)
            .await
            .map_err(map_db_error)?;
        into_relations(rows)
    }

    async fn create(&self, input: &NewRelation) -> Result<Relation, CoreError> {
        input.validate()?;
        let row = RelationRepo::insert(&self.pool, input)
            .await
            .map_err(|e| match map_db_error(e) {
                CoreError::Conflict(_) => {
                    CoreError::Conflict(format!("{} already exists", input.key()))
                }
                other => other,
            })?;
        Relation::try_from(row)
    }

    async fn update(
        &self,
        key: &RelationKey,
        patch: &RelationPatch,
    ) -> Result<Relation, CoreError> {
        patch.validate()?;
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let row = RelationRepo::find_for_update(&mut *tx, key)
            .await
            .map_err(map_db_error)?
            .ok_or(CoreError::RelationNotFound(*key))?;
        let mut relation = Relation::try_from(row)?;
        relation.apply(patch)?;

        let saved = RelationRepo::save(&mut *tx, &relation)
            .await
            .map_err(map_db_error)?
            .ok_or(CoreError::RelationNotFound(*key))?;
        tx.commit().await.map_err(map_db_error)?;
        Relation::try_from(saved)
    }

    async fn delete(&self, key: &RelationKey) -> Result<(), CoreError> {
        let deleted = RelationRepo::delete(&self.pool, key)
            .await
            .map_err(map_db_error)?;
        if deleted {
            Ok(())
        } else {
            Err(CoreError::RelationNotFound(*key))
        }
    }

    /// Delete and insert in one transaction. Any failure rolls back, so the
    /// source is never lost.
    async fn move_relation(
        &self,
        key: &RelationKey,
        to: RelationState,
    ) -> Result<Relation, CoreError> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let source = RelationRepo::find_for_update(&mut *tx, key)
            .await
            .map_err(map_db_error)?
            .ok_or(CoreError::RelationNotFound(*key))?;
        let target = NewRelation::copy_of(&Relation::try_from(source)?, to);
        target.validate()?;

        RelationRepo::delete(&mut *tx, key)
            .await
            .map_err(map_db_error)?;
        let row = RelationRepo::insert(&mut *tx, &target)
            .await
            .map_err(|e| match map_db_error(e) {
                CoreError::Conflict(_) => {
                    CoreError::Conflict(format!("{} already exists", target.key()))
                }
                other => other,
            })?;
        tx.commit().await.map_err(map_db_error)?;

        Relation::try_from(row)
    }
}

// ---------------------------------------------------------------------------
// Preferences
// ---------------------------------------------------------------------------

/// Preference store over the `user_preferences` table.
#[derive(Debug, Clone)]
pub struct PgPreferenceStore {
    pool: PgPool,
}

impl PgPreferenceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PreferenceStore for PgPreferenceStore {
    async fn get(&self, user_id: DbId, key: &str) -> Result<Option<String>, CoreError> {
        let pref = PreferenceRepo::get(&self.pool, user_id, key)
            .await
            .map_err(map_db_error)?;
        Ok(pref.map(|p| p.value))
    }

    async fn set(&self, user_id: DbId, key: &str, value: &str) -> Result<(), CoreError> {
        PreferenceRepo::upsert(&self.pool, user_id, key, value)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}

//! Repository for the `teacher_relations` table.
//!
//! Write methods accept any Postgres executor so that [`crate::stores`]
//! can chain them inside one transaction.

use sqlx::postgres::PgExecutor;
use sqlx::PgPool;
use yboard_core::relation::{
    InterviewDetails, NewRelation, Relation, RelationKey, RelationKind, RelationState,
};
use yboard_core::types::DbId;

use crate::models::relation::RelationRow;

const COLUMNS: &str = "teacher_id, promo_module_id, state, workload, rate, \
                       interview_date, interview_comments, decision, created_at, updated_at";

const KEY_FILTER: &str = "teacher_id = $1 AND promo_module_id = $2 AND state = $3";

fn interview_of(kind: &RelationKind) -> InterviewDetails {
    match kind {
        RelationKind::Potential(details) => details.clone(),
        RelationKind::Ongoing | RelationKind::Selected => InterviewDetails::default(),
    }
}

/// Provides CRUD operations for relations in all three states.
pub struct RelationRepo;

impl RelationRepo {
    pub async fn find<'e>(
        executor: impl PgExecutor<'e>,
        key: &RelationKey,
    ) -> Result<Option<RelationRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teacher_relations WHERE {KEY_FILTER}");
        sqlx::query_as::<_, RelationRow>(&query)
            .bind(key.teacher_id)
            .bind(key.promo_module_id)
            .bind(key.state.as_str())
            .fetch_optional(executor)
            .await
    }

    /// Like [`Self::find`], but locks the row until the transaction ends.
    pub async fn find_for_update<'e>(
        executor: impl PgExecutor<'e>,
        key: &RelationKey,
    ) -> Result<Option<RelationRow>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM teacher_relations WHERE {KEY_FILTER} FOR UPDATE");
        sqlx::query_as::<_, RelationRow>(&query)
            .bind(key.teacher_id)
            .bind(key.promo_module_id)
            .bind(key.state.as_str())
            .fetch_optional(executor)
            .await
    }

    pub async fn list_by_state(
        pool: &PgPool,
        state: RelationState,
    ) -> Result<Vec<RelationRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM teacher_relations WHERE state = $1
             ORDER BY promo_module_id, teacher_id"
        );
        sqlx::query_as::<_, RelationRow>(&query)
            .bind(state.as_str())
            .fetch_all(pool)
            .await
    }

    pub async fn list_for_promo_module(
        pool: &PgPool,
        promo_module_id: DbId,
    ) -> Result<Vec<RelationRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM teacher_relations WHERE promo_module_id = $1
             ORDER BY state, teacher_id"
        );
        sqlx::query_as::<_, RelationRow>(&query)
            .bind(promo_module_id)
            .fetch_all(pool)
            .await
    }

    pub async fn list_for_teacher(
        pool: &PgPool,
        teacher_id: DbId,
    ) -> Result<Vec<RelationRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM teacher_relations WHERE teacher_id = $1
             ORDER BY promo_module_id, state"
        );
        sqlx::query_as::<_, RelationRow>(&query)
            .bind(teacher_id)
            .fetch_all(pool)
            .await
    }

    /// Insert a relation. Fails on `uq_teacher_relations_key` if the key is taken.
    pub async fn insert<'e>(
        executor: impl PgExecutor<'e>,
        input: &NewRelation,
    ) -> Result<RelationRow, sqlx::Error> {
        let interview = interview_of(&input.kind);
        let query = format!(
            "INSERT INTO teacher_relations
                (teacher_id, promo_module_id, state, workload, rate,
                 interview_date, interview_comments, decision)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RelationRow>(&query)
            .bind(input.teacher_id)
            .bind(input.promo_module_id)
            .bind(input.kind.state().as_str())
            .bind(input.workload)
            .bind(input.rate)
            .bind(interview.interview_date)
            .bind(interview.interview_comments)
            .bind(interview.decision)
            .fetch_one(executor)
            .await
    }

    /// Overwrite the mutable columns of an existing relation.
    ///
    /// Returns `None` if the key does not exist.
    pub async fn save<'e>(
        executor: impl PgExecutor<'e>,
        relation: &Relation,
    ) -> Result<Option<RelationRow>, sqlx::Error> {
        let interview = interview_of(&relation.kind);
        let key = relation.key();
        let query = format!(
            "UPDATE teacher_relations SET
                workload = $4,
                rate = $5,
                interview_date = $6,
                interview_comments = $7,
                decision = $8
             WHERE {KEY_FILTER}
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RelationRow>(&query)
            .bind(key.teacher_id)
            .bind(key.promo_module_id)
            .bind(key.state.as_str())
            .bind(relation.workload)
            .bind(relation.rate)
            .bind(interview.interview_date)
            .bind(interview.interview_comments)
            .bind(interview.decision)
            .fetch_optional(executor)
            .await
    }

    /// Delete one relation. Returns `true` if a row was removed.
    pub async fn delete<'e>(
        executor: impl PgExecutor<'e>,
        key: &RelationKey,
    ) -> Result<bool, sqlx::Error> {
        let query = format!("DELETE FROM teacher_relations WHERE {KEY_FILTER}");
        let result = sqlx::query(&query)
            .bind(key.teacher_id)
            .bind(key.promo_module_id)
            .bind(key.state.as_str())
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

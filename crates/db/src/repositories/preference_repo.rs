//! Repository for the `user_preferences` table.

use sqlx::PgPool;
use yboard_core::types::DbId;

use crate::models::preference::UserPreference;

/// Get/upsert access to per-user preference slots.
pub struct PreferenceRepo;

impl PreferenceRepo {
    pub async fn get(
        pool: &PgPool,
        user_id: DbId,
        key: &str,
    ) -> Result<Option<UserPreference>, sqlx::Error> {
        sqlx::query_as::<_, UserPreference>(
            "SELECT user_id, key, value, updated_at FROM user_preferences
             WHERE user_id = $1 AND key = $2",
        )
        .bind(user_id)
        .bind(key)
        .fetch_optional(pool)
        .await
    }

    /// Insert or replace the value of a slot.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        key: &str,
        value: &str,
    ) -> Result<UserPreference, sqlx::Error> {
        sqlx::query_as::<_, UserPreference>(
            "INSERT INTO user_preferences (user_id, key, value)
             VALUES ($1, $2, $3)
             ON CONFLICT (user_id, key)
             DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
             RETURNING user_id, key, value, updated_at",
        )
        .bind(user_id)
        .bind(key)
        .bind(value)
        .fetch_one(pool)
        .await
    }
}

//! Per-user preference slots.

use serde::Serialize;
use sqlx::FromRow;
use yboard_core::types::{DbId, Timestamp};

/// A row from the `user_preferences` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserPreference {
    pub user_id: DbId,
    pub key: String,
    pub value: String,
    pub updated_at: Timestamp,
}

//! Teaching module (course subject) model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use yboard_core::error::CoreError;
use yboard_core::types::{DbId, Timestamp};

/// A row from the `modules` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Module {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or renaming a module.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateModule {
    pub name: String,
}

impl CreateModule {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation("Module name must not be empty".into()));
        }
        Ok(())
    }
}

//! Teacher entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use yboard_core::error::CoreError;
use yboard_core::relation::validate_rate;
use yboard_core::types::{DbId, Timestamp};

/// A row from the `teachers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Teacher {
    pub id: DbId,
    pub name: String,
    /// Default hourly rate, used when a relation has no rate of its own.
    pub rate: Option<f64>,
    pub status: Option<String>,
    pub diploma: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Stored CV filename, if one was uploaded.
    pub cv: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a teacher.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeacher {
    pub name: String,
    pub rate: Option<f64>,
    pub status: Option<String>,
    pub diploma: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl CreateTeacher {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_name(&self.name)?;
        if let Some(rate) = self.rate {
            validate_rate(rate)?;
        }
        Ok(())
    }
}

/// DTO for updating a teacher. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTeacher {
    pub name: Option<String>,
    pub rate: Option<f64>,
    pub status: Option<String>,
    pub diploma: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl UpdateTeacher {
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(rate) = self.rate {
            validate_rate(rate)?;
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("Teacher name must not be empty".into()));
    }
    Ok(())
}

//! Promo entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use yboard_core::error::CoreError;
use yboard_core::grouping::promo_key;
use yboard_core::promo::{validate_specialty, PromoLevel};
use yboard_core::types::{DbId, Timestamp};

/// A row from the `promos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Promo {
    pub id: DbId,
    #[sqlx(try_from = "String")]
    pub level: PromoLevel,
    pub specialty: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Promo {
    /// Display key, e.g. `"B1 Informatique"`.
    pub fn key(&self) -> String {
        promo_key(self.level, &self.specialty)
    }
}

/// DTO for creating a promo.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePromo {
    pub level: PromoLevel,
    pub specialty: String,
}

impl CreatePromo {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_specialty(&self.specialty)
    }
}

/// DTO for updating a promo. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePromo {
    pub level: Option<PromoLevel>,
    pub specialty: Option<String>,
}

impl UpdatePromo {
    pub fn validate(&self) -> Result<(), CoreError> {
        match &self.specialty {
            Some(specialty) => validate_specialty(specialty),
            None => Ok(()),
        }
    }
}

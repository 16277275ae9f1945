//! Promo-module model: a module taught to one promo with a base workload.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use yboard_core::error::CoreError;
use yboard_core::grouping::PromoGrouped;
use yboard_core::promo::PromoLevel;
use yboard_core::types::{DbId, Timestamp};

/// A row from the `promo_modules` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PromoModule {
    pub id: DbId,
    pub promo_id: DbId,
    pub module_id: DbId,
    /// Hours required for this module in this promo.
    pub workload: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A promo module joined with its promo and module names.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PromoModuleDetail {
    pub id: DbId,
    pub promo_id: DbId,
    #[sqlx(try_from = "String")]
    pub level: PromoLevel,
    pub specialty: String,
    pub module_id: DbId,
    pub module_name: String,
    pub workload: i32,
}

impl PromoGrouped for PromoModuleDetail {
    fn promo_level(&self) -> PromoLevel {
        self.level
    }

    fn promo_specialty(&self) -> &str {
        &self.specialty
    }
}

/// DTO for attaching a module to a promo.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePromoModule {
    pub promo_id: DbId,
    pub module_id: DbId,
    pub workload: i32,
}

impl CreatePromoModule {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_base_workload(self.workload)
    }
}

/// DTO for updating a promo module. Only the workload may change.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePromoModule {
    pub workload: i32,
}

impl UpdatePromoModule {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_base_workload(self.workload)
    }
}

fn validate_base_workload(workload: i32) -> Result<(), CoreError> {
    if workload < 0 {
        return Err(CoreError::Validation(format!(
            "Base workload must not be negative, got {workload}"
        )));
    }
    Ok(())
}

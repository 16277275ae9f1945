//! Promo (class cohort) levels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Study level of a promo, in curriculum order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PromoLevel {
    B1,
    B2,
    B3,
    M1,
    M2,
}

impl PromoLevel {
    pub const ALL: [PromoLevel; 5] = [Self::B1, Self::B2, Self::B3, Self::M1, Self::M2];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::B1 => "B1",
            Self::B2 => "B2",
            Self::B3 => "B3",
            Self::M1 => "M1",
            Self::M2 => "M2",
        }
    }
}

impl fmt::Display for PromoLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromoLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid promo level '{s}'. Must be one of: B1, B2, B3, M1, M2"
                ))
            })
    }
}

impl TryFrom<String> for PromoLevel {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Validate a promo specialty name.
pub fn validate_specialty(specialty: &str) -> Result<(), CoreError> {
    if specialty.trim().is_empty() {
        return Err(CoreError::Validation("specialty must not be empty".into()));
    }
    Ok(())
}

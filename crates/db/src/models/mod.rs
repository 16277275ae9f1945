//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod module;
pub mod preference;
pub mod promo;
pub mod promo_module;
pub mod relation;
pub mod teacher;
pub mod user;

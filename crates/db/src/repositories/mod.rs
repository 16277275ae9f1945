//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` (or any Postgres executor) as the first argument.

pub mod module_repo;
pub mod preference_repo;
pub mod promo_module_repo;
pub mod promo_repo;
pub mod relation_repo;
pub mod teacher_repo;
pub mod user_repo;

pub use module_repo::ModuleRepo;
pub use preference_repo::PreferenceRepo;
pub use promo_module_repo::PromoModuleRepo;
pub use promo_repo::PromoRepo;
pub use relation_repo::RelationRepo;
pub use teacher_repo::TeacherRepo;
pub use user_repo::UserRepo;

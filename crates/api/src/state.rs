use std::sync::Arc;

use yboard_core::cv::CvStorage;
use yboard_core::relation_store::RelationStore;
use yboard_core::selection::PreferenceStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for catalog data (teachers, promos, modules, users).
    pub pool: yboard_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Relations in all three states. All relation reads and writes go here.
    pub relations: Arc<dyn RelationStore>,
    /// Per-user preference slots (promo selection).
    pub preferences: Arc<dyn PreferenceStore>,
    /// Uploaded CV files.
    pub cv_storage: Arc<dyn CvStorage>,
}

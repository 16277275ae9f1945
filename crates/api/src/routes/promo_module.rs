//! Route definitions for `/promo-modules`: a module taught in a promo with
//! its required workload.

use axum::routing::get;
use axum::Router;

use crate::handlers::promo_module;
use crate::state::AppState;

/// Routes mounted at `/promo-modules`.
///
/// ```text
/// GET    /             -> list
/// POST   /             -> create
/// GET    /{id}         -> get_by_id
/// PUT    /{id}         -> update
/// DELETE /{id}         -> delete
/// GET    /{id}/stats   -> stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(promo_module::list).post(promo_module::create))
        .route(
            "/{id}",
            get(promo_module::get_by_id)
                .put(promo_module::update)
                .delete(promo_module::delete),
        )
        .route("/{id}/stats", get(promo_module::stats))
}

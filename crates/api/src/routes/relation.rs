//! Route definitions for `/relations`.
//!
//! `{state}` is one of `ongoing`, `potential`, `selected`. The static
//! `/transition` segment takes priority over `/{state}`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::relation;
use crate::state::AppState;

/// Routes mounted at `/relations`.
///
/// ```text
/// POST   /transition                                  -> transition
/// GET    /{state}                                     -> list
/// POST   /{state}                                     -> create
/// PUT    /{state}/{teacher_id}/{promo_module_id}      -> update
/// DELETE /{state}/{teacher_id}/{promo_module_id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/transition", post(relation::transition))
        .route("/{state}", get(relation::list).post(relation::create))
        .route(
            "/{state}/{teacher_id}/{promo_module_id}",
            put(relation::update).delete(relation::delete),
        )
}

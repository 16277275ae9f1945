use axum::routing::get;
use axum::Router;

use crate::handlers::promo;
use crate::state::AppState;

/// Routes mounted at `/promos`.
///
/// ```text
/// GET    /      -> list
/// POST   /      -> create
/// GET    /{id}  -> get_by_id
/// PUT    /{id}  -> update
/// DELETE /{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(promo::list).post(promo::create))
        .route(
            "/{id}",
            get(promo::get_by_id).put(promo::update).delete(promo::delete),
        )
}

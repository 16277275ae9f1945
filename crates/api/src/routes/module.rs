use axum::routing::get;
use axum::Router;

use crate::handlers::module;
use crate::state::AppState;

/// Routes mounted at `/modules`.
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
        .route("/", get(module::list).post(module::create))
        .route(
            "/{id}",
            get(module::get_by_id).put(module::update).delete(module::delete),
        )
}

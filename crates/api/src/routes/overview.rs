//! Route definitions for the dashboard overview and the promo selection
//! that filters it.

use axum::routing::get;
use axum::Router;

use crate::handlers::{overview, promo_selection};
use crate::state::AppState;

/// Routes mounted at `/overview`.
///
/// ```text
/// GET / -> get_overview
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(overview::get_overview))
}

/// Routes mounted at `/user/promo-selection`.
///
/// ```text
/// GET / -> get_selection
/// PUT / -> update_selection
/// ```
pub fn selection_router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(promo_selection::get_selection).put(promo_selection::update_selection),
    )
}

use axum::routing::get;
use axum::Router;

use crate::handlers::cv;
use crate::state::AppState;

/// Routes mounted at `/cvs`.
///
/// ```text
/// GET /{filename} -> download
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{filename}", get(cv::download))
}

pub mod auth;
pub mod cv;
pub mod health;
pub mod module;
pub mod overview;
pub mod promo;
pub mod promo_module;
pub mod relation;
pub mod teacher;
pub mod users;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
/// /me                                              current user
///
/// /users                                     list (admin only)
/// /users/{id}                                delete (admin only)
///
/// /teachers                                        list, create
/// /teachers/{id}                                   get (with relations), update, delete
/// /teachers/{id}/cv                                upload (multipart), remove
/// /cvs/{filename}                                  download
///
/// /promos                                          list, create
/// /promos/{id}                                     get, update, delete
///
/// /modules                                         list, create
/// /modules/{id}                                    get, rename, delete
///
/// /promo-modules                                   list (detailed), create
/// /promo-modules/{id}                              get, update workload, delete
/// /promo-modules/{id}/stats                        workload statistics
///
/// /relations/transition                            drag-and-drop transition (POST)
/// /relations/{state}                               list, create
/// /relations/{state}/{teacher_id}/{promo_module_id} update, delete
///
/// /overview                                        grouped dashboard (?all=true)
///
/// /user/promo-selection                            get, replace
/// ```
///
/// Every route except `/auth/register` and `/auth/login` requires a bearer
/// token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Auth routes (public).
        .nest("/auth", auth::router())
        // Current user.
        .route("/me", get(handlers::auth::me))
        // User management (admin only).
        .nest("/users", users::router())
        // Catalog.
        .nest("/teachers", teacher::router())
        .nest("/cvs", cv::router())
        .nest("/promos", promo::router())
        .nest("/modules", module::router())
        .nest("/promo-modules", promo_module::router())
        // Assignments.
        .nest("/relations", relation::router())
        .nest("/overview", overview::router())
        .nest("/user/promo-selection", overview::selection_router())
}

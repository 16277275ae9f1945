//! Admin-only user management.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use yboard_core::error::CoreError;
use yboard_core::types::DbId;
use yboard_db::models::user::UserResponse;
use yboard_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/users
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(DataResponse {
        data: users.into_iter().map(UserResponse::from).collect(),
    }))
}

/// DELETE /api/v1/users/{id}
///
/// Admins cannot delete their own account.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.user_id {
        return Err(AppError::BadRequest(
            "Cannot delete your own account".into(),
        ));
    }
    if !UserRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    tracing::info!(user_id = id, admin_id = admin.user_id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}

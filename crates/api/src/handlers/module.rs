//! Handlers for the `/modules` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use yboard_core::error::CoreError;
use yboard_core::types::DbId;
use yboard_db::models::module::{CreateModule, Module};
use yboard_db::repositories::ModuleRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Module",
        id,
    })
}

/// POST /api/v1/modules
pub async fn create(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateModule>,
) -> AppResult<(StatusCode, Json<DataResponse<Module>>)> {
    input.validate()?;
    let module = ModuleRepo::create(&state.pool, &input).await?;
    tracing::info!(module_id = module.id, name = %module.name, "Module created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: module })))
}

/// GET /api/v1/modules
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Module>>>> {
    let modules = ModuleRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: modules }))
}

/// GET /api/v1/modules/{id}
pub async fn get_by_id(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Module>>> {
    let module = ModuleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: module }))
}

/// PUT /api/v1/modules/{id}
pub async fn update(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateModule>,
) -> AppResult<Json<DataResponse<Module>>> {
    input.validate()?;
    let module = ModuleRepo::rename(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(module_id = id, name = %module.name, "Module renamed");
    Ok(Json(DataResponse { data: module }))
}

/// DELETE /api/v1/modules/{id}
pub async fn delete(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ModuleRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(module_id = id, "Module deleted");
    Ok(StatusCode::NO_CONTENT)
}

//! Handlers for the `/promos` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use yboard_core::error::CoreError;
use yboard_core::types::DbId;
use yboard_db::models::promo::{CreatePromo, Promo, UpdatePromo};
use yboard_db::repositories::PromoRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Promo", id })
}

/// POST /api/v1/promos
pub async fn create(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePromo>,
) -> AppResult<(StatusCode, Json<DataResponse<Promo>>)> {
    input.validate()?;
    let promo = PromoRepo::create(&state.pool, &input).await?;
    tracing::info!(promo_id = promo.id, promo = %promo.key(), "Promo created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: promo })))
}

/// GET /api/v1/promos
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Promo>>>> {
    let promos = PromoRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: promos }))
}

/// GET /api/v1/promos/{id}
pub async fn get_by_id(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Promo>>> {
    let promo = PromoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: promo }))
}

/// PUT /api/v1/promos/{id}
pub async fn update(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePromo>,
) -> AppResult<Json<DataResponse<Promo>>> {
    input.validate()?;
    let promo = PromoRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(promo_id = id, promo = %promo.key(), "Promo updated");
    Ok(Json(DataResponse { data: promo }))
}

/// DELETE /api/v1/promos/{id}
pub async fn delete(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !PromoRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(promo_id = id, "Promo deleted");
    Ok(StatusCode::NO_CONTENT)
}

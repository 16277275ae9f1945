//! Handlers for the `/promo-modules` resource, including per-module
//! workload statistics.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use yboard_core::error::CoreError;
use yboard_core::relation::Relation;
use yboard_core::types::DbId;
use yboard_core::workload::{compute_stats, ModuleAllocation, WorkloadStats};
use yboard_db::models::promo_module::{
    CreatePromoModule, PromoModule, PromoModuleDetail, UpdatePromoModule,
};
use yboard_db::repositories::{PromoModuleRepo, TeacherRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Statistics of one promo module, with the relations they were computed from.
#[derive(Debug, Serialize)]
pub struct PromoModuleStats {
    pub promo_module: PromoModuleDetail,
    pub stats: WorkloadStats,
    pub relations: Vec<Relation>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "PromoModule",
        id,
    })
}

/// POST /api/v1/promo-modules
pub async fn create(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePromoModule>,
) -> AppResult<(StatusCode, Json<DataResponse<PromoModule>>)> {
    input.validate()?;
    let promo_module = PromoModuleRepo::create(&state.pool, &input).await?;
    tracing::info!(
        promo_module_id = promo_module.id,
        promo_id = input.promo_id,
        module_id = input.module_id,
        workload = input.workload,
        "Module attached to promo"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: promo_module })))
}

/// GET /api/v1/promo-modules
///
/// Sorted by level, specialty, then module name.
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<PromoModuleDetail>>>> {
    let rows = PromoModuleRepo::list_detailed(&state.pool).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/promo-modules/{id}
pub async fn get_by_id(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<PromoModuleDetail>>> {
    let row = PromoModuleRepo::find_detailed(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: row }))
}

/// PUT /api/v1/promo-modules/{id}
pub async fn update(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePromoModule>,
) -> AppResult<Json<DataResponse<PromoModule>>> {
    input.validate()?;
    let promo_module = PromoModuleRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(promo_module_id = id, workload = input.workload, "Base workload updated");
    Ok(Json(DataResponse { data: promo_module }))
}

/// DELETE /api/v1/promo-modules/{id}
pub async fn delete(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !PromoModuleRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(promo_module_id = id, "Promo module deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/promo-modules/{id}/stats
///
/// Recomputed from a fresh read of the module's relations on every call.
pub async fn stats(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<PromoModuleStats>>> {
    let promo_module = PromoModuleRepo::find_detailed(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let relations = state.relations.list_for_promo_module(id).await?;
    let teacher_rates = TeacherRepo::default_rates(&state.pool).await?;

    let allocation =
        ModuleAllocation::from_relations(promo_module.workload, &relations, &teacher_rates);
    let stats = compute_stats(&allocation);

    Ok(Json(DataResponse {
        data: PromoModuleStats {
            promo_module,
            stats,
            relations,
        },
    }))
}

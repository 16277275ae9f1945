//! Handlers for relations in their three states and for drag-and-drop
//! transitions between them.
//!
//! All reads and writes go through the injected [`RelationStore`](yboard_core::relation_store::RelationStore).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use yboard_core::relation::{
    InterviewDetails, NewRelation, Relation, RelationKey, RelationKind, RelationPatch,
    RelationState,
};
use yboard_core::transition::{apply_transition, TransitionOutcome, TransitionRequest};
use yboard_core::types::DbId;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /relations/{state}`.
///
/// Interview fields are only accepted when `state` is `potential`.
#[derive(Debug, Deserialize)]
pub struct CreateRelationRequest {
    pub teacher_id: DbId,
    pub promo_module_id: DbId,
    pub workload: i32,
    pub rate: Option<f64>,
    #[serde(flatten)]
    pub interview: InterviewDetails,
}

fn parse_state(raw: &str) -> AppResult<RelationState> {
    Ok(raw.parse()?)
}

/// GET /api/v1/relations/{state}
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(relation_state): Path<String>,
) -> AppResult<Json<DataResponse<Vec<Relation>>>> {
    let relation_state = parse_state(&relation_state)?;
    let relations = state.relations.list_by_state(relation_state).await?;
    Ok(Json(DataResponse { data: relations }))
}

/// POST /api/v1/relations/{state}
pub async fn create(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(relation_state): Path<String>,
    Json(input): Json<CreateRelationRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Relation>>)> {
    let relation_state = parse_state(&relation_state)?;
    let new_relation = NewRelation {
        teacher_id: input.teacher_id,
        promo_module_id: input.promo_module_id,
        workload: input.workload,
        rate: input.rate,
        kind: RelationKind::from_parts(relation_state, input.interview)?,
    };

    let relation = state.relations.create(&new_relation).await?;
    tracing::info!(
        teacher_id = relation.teacher_id,
        promo_module_id = relation.promo_module_id,
        state = %relation.state(),
        workload = relation.workload,
        "Relation created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: relation })))
}

/// PUT /api/v1/relations/{state}/{teacher_id}/{promo_module_id}
pub async fn update(
    _user: AuthUser,
    State(state): State<AppState>,
    Path((relation_state, teacher_id, promo_module_id)): Path<(String, DbId, DbId)>,
    Json(patch): Json<RelationPatch>,
) -> AppResult<Json<DataResponse<Relation>>> {
    let key = RelationKey::new(teacher_id, promo_module_id, parse_state(&relation_state)?);
    let relation = state.relations.update(&key, &patch).await?;
    tracing::info!(%key, workload = relation.workload, "Relation updated");
    Ok(Json(DataResponse { data: relation }))
}

/// DELETE /api/v1/relations/{state}/{teacher_id}/{promo_module_id}
pub async fn delete(
    _user: AuthUser,
    State(state): State<AppState>,
    Path((relation_state, teacher_id, promo_module_id)): Path<(String, DbId, DbId)>,
) -> AppResult<StatusCode> {
    let key = RelationKey::new(teacher_id, promo_module_id, parse_state(&relation_state)?);
    state.relations.delete(&key).await?;
    tracing::info!(%key, "Relation deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/relations/transition
///
/// Applies a drag-and-drop from one state column onto another. Returns the
/// outcome (`unchanged`, `duplicated` or `moved`) with the resulting relation.
pub async fn transition(
    user: AuthUser,
    State(state): State<AppState>,
    Json(request): Json<TransitionRequest>,
) -> AppResult<Json<DataResponse<TransitionOutcome>>> {
    let outcome = apply_transition(state.relations.as_ref(), &request).await?;
    tracing::info!(
        user_id = user.user_id,
        teacher_id = request.teacher_id,
        promo_module_id = request.promo_module_id,
        from = %request.from,
        to = %request.to,
        "Relation transition applied"
    );
    Ok(Json(DataResponse { data: outcome }))
}

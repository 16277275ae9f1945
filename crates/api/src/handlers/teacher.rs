//! Handlers for the `/teachers` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use yboard_core::error::CoreError;
use yboard_core::relation::Relation;
use yboard_core::types::DbId;
use yboard_db::models::teacher::{CreateTeacher, Teacher, UpdateTeacher};
use yboard_db::repositories::TeacherRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// A teacher together with every relation they hold.
#[derive(Debug, Serialize)]
pub struct TeacherDetail {
    #[serde(flatten)]
    pub teacher: Teacher,
    pub relations: Vec<Relation>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Teacher",
        id,
    })
}

/// POST /api/v1/teachers
pub async fn create(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTeacher>,
) -> AppResult<(StatusCode, Json<DataResponse<Teacher>>)> {
    input.validate()?;
    let teacher = TeacherRepo::create(&state.pool, &input).await?;
    tracing::info!(teacher_id = teacher.id, name = %teacher.name, "Teacher created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: teacher })))
}

/// GET /api/v1/teachers
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Teacher>>>> {
    let teachers = TeacherRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: teachers }))
}

/// GET /api/v1/teachers/{id}
pub async fn get_by_id(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<TeacherDetail>>> {
    let teacher = TeacherRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let relations = state.relations.list_for_teacher(id).await?;
    Ok(Json(DataResponse {
        data: TeacherDetail { teacher, relations },
    }))
}

/// PUT /api/v1/teachers/{id}
pub async fn update(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTeacher>,
) -> AppResult<Json<DataResponse<Teacher>>> {
    input.validate()?;
    let teacher = TeacherRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(teacher_id = id, "Teacher updated");
    Ok(Json(DataResponse { data: teacher }))
}

/// DELETE /api/v1/teachers/{id}
///
/// Relations go with the teacher (database cascade). The stored CV, if any,
/// is removed afterwards; failing to remove it only logs a warning.
pub async fn delete(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let teacher = TeacherRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    if !TeacherRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    if let Some(cv) = teacher.cv {
        if let Err(e) = state.cv_storage.delete(&cv).await {
            tracing::warn!(teacher_id = id, cv = %cv, error = %e, "Could not remove CV file");
        }
    }

    tracing::info!(teacher_id = id, "Teacher deleted");
    Ok(StatusCode::NO_CONTENT)
}

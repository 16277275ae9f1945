//! CV upload, download and removal.

use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use yboard_core::cv::CV_CONTENT_TYPE;
use yboard_core::error::CoreError;
use yboard_core::types::DbId;
use yboard_db::models::teacher::Teacher;
use yboard_db::repositories::TeacherRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

fn teacher_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Teacher",
        id,
    })
}

/// POST /api/v1/teachers/{id}/cv
///
/// Accepts a multipart form with a required `file` field holding a PDF.
/// A previously stored CV is replaced and its file removed.
pub async fn upload(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(teacher_id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Teacher>>)> {
    let mut file: Option<(Option<String>, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        file = Some((content_type, data.to_vec()));
    }

    let (content_type, data) =
        file.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;

    TeacherRepo::find_by_id(&state.pool, teacher_id)
        .await?
        .ok_or_else(|| teacher_not_found(teacher_id))?;

    let filename = state
        .cv_storage
        .store(teacher_id, content_type.as_deref(), &data)
        .await?;

    let previous = match TeacherRepo::set_cv(&state.pool, teacher_id, Some(&filename)).await? {
        Some(previous) => previous,
        None => {
            // Teacher deleted between the check and the update.
            if let Err(e) = state.cv_storage.delete(&filename).await {
                tracing::warn!(teacher_id, cv = %filename, error = %e, "Could not remove orphaned CV");
            }
            return Err(teacher_not_found(teacher_id));
        }
    };
    if let Some(old) = previous.filter(|old| *old != filename) {
        if let Err(e) = state.cv_storage.delete(&old).await {
            tracing::warn!(teacher_id, cv = %old, error = %e, "Could not remove replaced CV");
        }
    }

    let teacher = TeacherRepo::find_by_id(&state.pool, teacher_id)
        .await?
        .ok_or_else(|| teacher_not_found(teacher_id))?;
    tracing::info!(teacher_id, cv = %filename, size = data.len(), "CV uploaded");
    Ok((StatusCode::CREATED, Json(DataResponse { data: teacher })))
}

/// DELETE /api/v1/teachers/{id}/cv
pub async fn remove(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(teacher_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let previous = TeacherRepo::set_cv(&state.pool, teacher_id, None)
        .await?
        .ok_or_else(|| teacher_not_found(teacher_id))?;
    let filename = previous.ok_or_else(|| {
        AppError::Core(CoreError::FileNotFound(format!("CV of teacher {teacher_id}")))
    })?;

    match state.cv_storage.delete(&filename).await {
        Ok(()) => {}
        Err(CoreError::FileNotFound(_)) => {
            tracing::warn!(teacher_id, cv = %filename, "CV reference pointed to a missing file");
        }
        Err(e) => return Err(e.into()),
    }

    tracing::info!(teacher_id, cv = %filename, "CV removed");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/cvs/{filename}
///
/// Streams the stored PDF back with an inline content disposition.
pub async fn download(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> AppResult<Response> {
    let bytes = state.cv_storage.fetch(&filename).await?;
    Ok((
        [
            (CONTENT_TYPE, CV_CONTENT_TYPE.to_string()),
            (CONTENT_DISPOSITION, format!("inline; filename=\"{filename}\"")),
        ],
        Body::from(bytes),
    )
        .into_response())
}

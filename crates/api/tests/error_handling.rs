//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no server or
//! database is involved.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use yboard_api::error::AppError;
use yboard_core::error::CoreError;
use yboard_core::relation::{RelationKey, RelationState};

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Test: CoreError::NotFound maps to 404 with NOT_FOUND code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Teacher",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Teacher with id 42 not found");
}

#[tokio::test]
async fn missing_relation_returns_404() {
    let key = RelationKey::new(1, 2, RelationState::Potential);
    let (status, json) = error_to_response(CoreError::RelationNotFound(key).into()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Test: validation and conflict errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("workload must be positive".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "workload must be positive");
}

#[tokio::test]
async fn bad_request_error_returns_400() {
    let (status, json) =
        error_to_response(AppError::BadRequest("invalid field value".into())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn conflict_error_returns_409() {
    let err = AppError::Core(CoreError::Conflict("duplicate name".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["error"], "duplicate name");
}

// ---------------------------------------------------------------------------
// Test: transition errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_transition_returns_422() {
    let err = AppError::Core(CoreError::InvalidTransition {
        from: RelationState::Selected,
        to: RelationState::Ongoing,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "INVALID_TRANSITION");
}

#[tokio::test]
async fn incomplete_transition_names_the_lost_relation() {
    let err = AppError::Core(CoreError::TransitionIncomplete {
        key: RelationKey::new(1, 2, RelationState::Potential),
        to: RelationState::Selected,
        reason: "connection reset".into(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "TRANSITION_INCOMPLETE");
    let message = json["error"].as_str().unwrap();
    assert!(message.contains("recreated manually"));
    assert!(!message.contains("connection reset"));
}

// ---------------------------------------------------------------------------
// Test: auth errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unauthorized_and_forbidden() {
    let (status, _) =
        error_to_response(CoreError::Unauthorized("no token".into()).into()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = error_to_response(CoreError::Forbidden("admin only".into()).into()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Test: internal errors are sanitized
// ---------------------------------------------------------------------------

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("secret database credentials leaked".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn row_not_found_maps_to_404() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

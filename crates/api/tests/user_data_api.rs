//! Integration tests for per-user promo selection and CV downloads.

mod common;

use axum::http::StatusCode;
use common::{body_bytes, expect_json, TestApp};
use serde_json::json;
use yboard_core::cv::{CvStorage, CV_CONTENT_TYPE};
use yboard_core::selection::{PreferenceStore, SELECTED_PROMOS_KEY};

// ---------------------------------------------------------------------------
// Promo selection
// ---------------------------------------------------------------------------

#[tokio::test]
async fn save_promo_selection_stores_a_set() {
    let app = TestApp::new();
    let token = app.staff_token(7);

    let response = app
        .put_json(
            "/api/v1/user/promo-selection",
            &token,
            json!({ "selected_promos": ["M2 Marketing", "B1 Informatique", "M2 Marketing"] }),
        )
        .await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"], json!(["B1 Informatique", "M2 Marketing"]));

    let stored = app
        .preferences
        .get(7, SELECTED_PROMOS_KEY)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored, r#"["B1 Informatique","M2 Marketing"]"#);

    // Nothing is written for other users.
    assert!(app
        .preferences
        .get(8, SELECTED_PROMOS_KEY)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn empty_promo_selection_is_kept() {
    let app = TestApp::new();
    let token = app.staff_token(7);

    let response = app
        .put_json(
            "/api/v1/user/promo-selection",
            &token,
            json!({ "selected_promos": [] }),
        )
        .await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"], json!([]));
    assert_eq!(
        app.preferences.get(7, SELECTED_PROMOS_KEY).await.unwrap(),
        Some("[]".to_string())
    );
}

#[tokio::test]
async fn malformed_selection_body_is_rejected() {
    let app = TestApp::new();
    let token = app.staff_token(7);

    let response = app
        .put_json(
            "/api/v1/user/promo-selection",
            &token,
            json!({ "selected_promos": "B1 Informatique" }),
        )
        .await;
    assert!(response.status().is_client_error());
    assert!(app
        .preferences
        .get(7, SELECTED_PROMOS_KEY)
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// CV download
// ---------------------------------------------------------------------------

#[tokio::test]
async fn download_stored_cv() {
    let app = TestApp::new();
    let token = app.staff_token(1);
    let pdf = b"%PDF-1.7 test document".to_vec();
    let filename = app
        .cv_storage
        .store(4, Some(CV_CONTENT_TYPE), &pdf)
        .await
        .unwrap();

    let response = app.get(&format!("/api/v1/cvs/{filename}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], CV_CONTENT_TYPE);
    assert!(response.headers()["content-disposition"]
        .to_str()
        .unwrap()
        .starts_with("inline"));
    assert_eq!(body_bytes(response).await, pdf);
}

#[tokio::test]
async fn download_missing_cv_is_404() {
    let app = TestApp::new();
    let token = app.staff_token(1);

    let response = app.get("/api/v1/cvs/cv_4_1.pdf", &token).await;
    let json = expect_json(response, StatusCode::NOT_FOUND).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn download_rejects_path_traversal() {
    let app = TestApp::new();
    let token = app.staff_token(1);

    let response = app.get("/api/v1/cvs/..%2Fsecret.pdf", &token).await;
    let json = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn download_requires_a_token() {
    let app = TestApp::new();
    let response = app
        .request(axum::http::Method::GET, "/api/v1/cvs/cv_4_1.pdf", None, None)
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

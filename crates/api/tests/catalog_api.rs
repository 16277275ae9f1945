//! Endpoints that read the catalog tables: overview, per-module stats and
//! CV upload. These run the production Postgres stores.

mod common;

use axum::http::StatusCode;
use common::{expect_json, DbTestApp};
use serde_json::{json, Value};
use sqlx::PgPool;
use yboard_core::roles::ROLE_STAFF;
use yboard_core::types::DbId;
use yboard_db::models::user::CreateUser;
use yboard_db::repositories::UserRepo;

const PDF: &[u8] = b"%PDF-1.4\n%test\n";

async fn staff_user(app: &DbTestApp) -> String {
    let user = UserRepo::create(
        &app.pool,
        &CreateUser {
            email: "staff@yboard.test".to_string(),
            name: "Staff".to_string(),
            password_hash: "not-a-real-hash".to_string(),
            role: ROLE_STAFF.to_string(),
        },
    )
    .await
    .unwrap();
    app.staff_token(user.id)
}

async fn created_id(app: &DbTestApp, token: &str, uri: &str, body: Value) -> DbId {
    let response = app.post_json(uri, token, body).await;
    let json = expect_json(response, StatusCode::CREATED).await;
    json["data"]["id"].as_i64().unwrap()
}

/// Create a promo with one module attached and return the promo-module id.
async fn promo_with_module(
    app: &DbTestApp,
    token: &str,
    level: &str,
    specialty: &str,
    module: &str,
    workload: i32,
) -> DbId {
    let promo_id = created_id(
        app,
        token,
        "/api/v1/promos",
        json!({ "level": level, "specialty": specialty }),
    )
    .await;
    let module_id = created_id(app, token, "/api/v1/modules", json!({ "name": module })).await;
    created_id(
        app,
        token,
        "/api/v1/promo-modules",
        json!({ "promo_id": promo_id, "module_id": module_id, "workload": workload }),
    )
    .await
}

async fn teacher(app: &DbTestApp, token: &str, name: &str, rate: f64) -> DbId {
    created_id(
        app,
        token,
        "/api/v1/teachers",
        json!({ "name": name, "rate": rate }),
    )
    .await
}

async fn relate(
    app: &DbTestApp,
    token: &str,
    state: &str,
    teacher_id: DbId,
    promo_module_id: DbId,
    workload: i32,
) {
    let response = app
        .post_json(
            &format!("/api/v1/relations/{state}"),
            token,
            json!({
                "teacher_id": teacher_id,
                "promo_module_id": promo_module_id,
                "workload": workload,
            }),
        )
        .await;
    expect_json(response, StatusCode::CREATED).await;
}

fn section_promos(overview: &Value) -> Vec<&str> {
    overview["sections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["promo"].as_str().unwrap())
        .collect()
}

// ---------------------------------------------------------------------------
// Promo-module statistics
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn stats_count_only_selected_hours_toward_coverage(pool: PgPool) {
    let app = DbTestApp::new(pool);
    let token = app.staff_token(1);

    let pm = promo_with_module(&app, &token, "B1", "Informatique", "Algorithmique", 40).await;
    let alice = teacher(&app, &token, "Alice", 50.0).await;
    let bob = teacher(&app, &token, "Bob", 60.0).await;

    relate(&app, &token, "selected", alice, pm, 30).await;
    relate(&app, &token, "ongoing", bob, pm, 40).await;
    relate(&app, &token, "potential", bob, pm, 100).await;

    let response = app
        .get(&format!("/api/v1/promo-modules/{pm}/stats"), &token)
        .await;
    let json = expect_json(response, StatusCode::OK).await;
    let stats = &json["data"]["stats"];

    assert_eq!(stats["base_workload"], 40);
    assert_eq!(stats["selected_total"], 30);
    assert_eq!(stats["ongoing_total"], 40);
    assert_eq!(stats["potential_total"], 100);
    assert_eq!(stats["total_assigned"], 30);
    assert_eq!(stats["coverage"], 75.0);
    assert_eq!(stats["remaining"], 10);
    assert_eq!(stats["selected_cost"], 1500.0);
    assert_eq!(stats["status"], "partially_allocated");
    assert_eq!(json["data"]["relations"].as_array().unwrap().len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn stats_for_unknown_promo_module_is_404(pool: PgPool) {
    let app = DbTestApp::new(pool);
    let token = app.staff_token(1);

    let response = app.get("/api/v1/promo-modules/9999/stats", &token).await;
    let json = expect_json(response, StatusCode::NOT_FOUND).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Overview
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn overview_without_saved_selection_shows_every_promo(pool: PgPool) {
    let app = DbTestApp::new(pool);
    let token = staff_user(&app).await;

    let info = promo_with_module(&app, &token, "B1", "Informatique", "Algorithmique", 40).await;
    promo_with_module(&app, &token, "M1", "Data", "Statistiques", 20).await;
    let alice = teacher(&app, &token, "Alice", 50.0).await;
    relate(&app, &token, "selected", alice, info, 20).await;

    let response = app.get("/api/v1/overview", &token).await;
    let json = expect_json(response, StatusCode::OK).await;
    let overview = &json["data"];

    assert_eq!(overview["shown_promos"], json!(["B1 Informatique", "M1 Data"]));
    assert_eq!(section_promos(overview), vec!["B1 Informatique", "M1 Data"]);

    let b1 = &overview["sections"][0];
    assert_eq!(b1["summary"]["module_count"], 1);
    assert_eq!(b1["summary"]["total_assigned"], 20);
    assert_eq!(b1["modules"][0]["module_name"], "Algorithmique");
    assert_eq!(b1["modules"][0]["stats"]["coverage"], 50.0);

    assert_eq!(overview["summary"]["module_count"], 2);
    assert_eq!(overview["summary"]["base_workload"], 60);
    assert_eq!(overview["summary"]["total_assigned"], 20);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn overview_follows_saved_selection_unless_all_requested(pool: PgPool) {
    let app = DbTestApp::new(pool);
    let token = staff_user(&app).await;

    promo_with_module(&app, &token, "B1", "Informatique", "Algorithmique", 40).await;
    promo_with_module(&app, &token, "M1", "Data", "Statistiques", 20).await;

    let response = app
        .put_json(
            "/api/v1/user/promo-selection",
            &token,
            json!({ "selected_promos": ["M1 Data"] }),
        )
        .await;
    expect_json(response, StatusCode::OK).await;

    let response = app.get("/api/v1/overview", &token).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"]["shown_promos"], json!(["M1 Data"]));
    assert_eq!(json["data"]["summary"]["module_count"], 1);
    assert_eq!(json["data"]["summary"]["base_workload"], 20);

    let response = app.get("/api/v1/overview?all=true", &token).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(
        json["data"]["shown_promos"],
        json!(["B1 Informatique", "M1 Data"])
    );
    assert_eq!(json["data"]["summary"]["module_count"], 2);

    // The saved selection is untouched by `?all=true`.
    let response = app.get("/api/v1/user/promo-selection", &token).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"], json!(["M1 Data"]));
}

// ---------------------------------------------------------------------------
// CV upload
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn second_upload_replaces_first_cv(pool: PgPool) {
    let app = DbTestApp::new(pool);
    let token = app.staff_token(1);
    let alice = teacher(&app, &token, "Alice", 50.0).await;
    let uri = format!("/api/v1/teachers/{alice}/cv");

    let response = app
        .post_file(&uri, &token, "first.pdf", "application/pdf", PDF)
        .await;
    let json = expect_json(response, StatusCode::CREATED).await;
    let first = json["data"]["cv"].as_str().unwrap().to_string();
    assert!(app.cv_exists(&first));

    // Stored names carry a millisecond timestamp.
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let response = app
        .post_file(&uri, &token, "second.pdf", "application/pdf", PDF)
        .await;
    let json = expect_json(response, StatusCode::CREATED).await;
    let second = json["data"]["cv"].as_str().unwrap().to_string();

    assert_ne!(first, second);
    assert!(app.cv_exists(&second));
    assert!(!app.cv_exists(&first));

    let response = app.get(&format!("/api/v1/cvs/{first}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = app.get(&format!("/api/v1/cvs/{second}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(common::body_bytes(response).await, PDF);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn non_pdf_upload_is_rejected_and_keeps_existing_cv(pool: PgPool) {
    let app = DbTestApp::new(pool);
    let token = app.staff_token(1);
    let alice = teacher(&app, &token, "Alice", 50.0).await;
    let uri = format!("/api/v1/teachers/{alice}/cv");

    let response = app
        .post_file(&uri, &token, "cv.pdf", "application/pdf", PDF)
        .await;
    let json = expect_json(response, StatusCode::CREATED).await;
    let stored = json["data"]["cv"].as_str().unwrap().to_string();

    let response = app
        .post_file(&uri, &token, "cv.txt", "text/plain", b"plain text")
        .await;
    expect_json(response, StatusCode::BAD_REQUEST).await;

    let response = app.get(&format!("/api/v1/teachers/{alice}"), &token).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"]["cv"], stored.as_str());
    assert!(app.cv_exists(&stored));
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn upload_for_unknown_teacher_writes_nothing(pool: PgPool) {
    let app = DbTestApp::new(pool);
    let token = app.staff_token(1);

    let response = app
        .post_file(
            "/api/v1/teachers/9999/cv",
            &token,
            "cv.pdf",
            "application/pdf",
            PDF,
        )
        .await;
    expect_json(response, StatusCode::NOT_FOUND).await;

    let leftover = std::fs::read_dir(app.cv_dir.path())
        .map(|entries| entries.count())
        .unwrap_or(0);
    assert_eq!(leftover, 0);
}

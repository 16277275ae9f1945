//! Integration tests for the catalog repositories (teachers, promos,
//! modules, promo modules). Ignored unless a database is available.

use sqlx::PgPool;
use yboard_core::grouping::{group_by_promo, PromoGrouped};
use yboard_core::promo::PromoLevel;
use yboard_db::models::module::CreateModule;
use yboard_db::models::promo::{CreatePromo, UpdatePromo};
use yboard_db::models::promo_module::CreatePromoModule;
use yboard_db::models::teacher::{CreateTeacher, UpdateTeacher};
use yboard_db::repositories::{ModuleRepo, PromoModuleRepo, PromoRepo, TeacherRepo};

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(e) if e.code().as_deref() == Some("23505"))
}

async fn promo(pool: &PgPool, level: PromoLevel, specialty: &str) -> i64 {
    PromoRepo::create(
        pool,
        &CreatePromo {
            level,
            specialty: specialty.to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn module(pool: &PgPool, name: &str) -> i64 {
    ModuleRepo::create(
        pool,
        &CreateModule {
            name: name.to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn attach(pool: &PgPool, promo_id: i64, module_id: i64, workload: i32) -> i64 {
    PromoModuleRepo::create(
        pool,
        &CreatePromoModule {
            promo_id,
            module_id,
            workload,
        },
    )
    .await
    .unwrap()
    .id
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_teacher_update_keeps_unset_fields(pool: PgPool) {
    let teacher = TeacherRepo::create(
        &pool,
        &CreateTeacher {
            name: "Grace Hopper".to_string(),
            rate: Some(35.0),
            status: Some("vacataire".to_string()),
            diploma: None,
            email: Some("grace@school.test".to_string()),
            phone: None,
        },
    )
    .await
    .unwrap();

    let updated = TeacherRepo::update(
        &pool,
        teacher.id,
        &UpdateTeacher {
            rate: Some(45.0),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.rate, Some(45.0));
    assert_eq!(updated.email.as_deref(), Some("grace@school.test"));
    assert_eq!(updated.status.as_deref(), Some("vacataire"));

    let rates = TeacherRepo::default_rates(&pool).await.unwrap();
    assert_eq!(rates.get(&teacher.id), Some(&Some(45.0)));
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_set_cv_returns_previous_filename(pool: PgPool) {
    let teacher = TeacherRepo::create(
        &pool,
        &CreateTeacher {
            name: "Alan Turing".to_string(),
            rate: None,
            status: None,
            diploma: None,
            email: None,
            phone: None,
        },
    )
    .await
    .unwrap();

    let first = TeacherRepo::set_cv(&pool, teacher.id, Some("cv_1_1.pdf"))
        .await
        .unwrap();
    assert_eq!(first, Some(None));
    let second = TeacherRepo::set_cv(&pool, teacher.id, None).await.unwrap();
    assert_eq!(second, Some(Some("cv_1_1.pdf".to_string())));
    assert_eq!(TeacherRepo::set_cv(&pool, 9_999, None).await.unwrap(), None);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_promo_level_specialty_is_unique(pool: PgPool) {
    promo(&pool, PromoLevel::M1, "Data").await;
    let err = PromoRepo::create(
        &pool,
        &CreatePromo {
            level: PromoLevel::M1,
            specialty: "Data".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert!(is_unique_violation(&err));
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_promo_update_changes_level(pool: PgPool) {
    let id = promo(&pool, PromoLevel::B2, "Design").await;
    let updated = PromoRepo::update(
        &pool,
        id,
        &UpdatePromo {
            level: Some(PromoLevel::B3),
            specialty: None,
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.level, PromoLevel::B3);
    assert_eq!(updated.key(), "B3 Design");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_module_attached_once_per_promo(pool: PgPool) {
    let promo_id = promo(&pool, PromoLevel::B1, "Informatique").await;
    let module_id = module(&pool, "Réseaux").await;
    attach(&pool, promo_id, module_id, 30).await;

    let err = PromoModuleRepo::create(
        &pool,
        &CreatePromoModule {
            promo_id,
            module_id,
            workload: 10,
        },
    )
    .await
    .unwrap_err();
    assert!(is_unique_violation(&err));
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_detailed_list_groups_by_promo(pool: PgPool) {
    let m2 = promo(&pool, PromoLevel::M2, "Marketing").await;
    let b1 = promo(&pool, PromoLevel::B1, "Informatique").await;
    let algo = module(&pool, "Algorithmique").await;
    let branding = module(&pool, "Branding").await;
    let web = module(&pool, "Web").await;
    attach(&pool, m2, branding, 20).await;
    attach(&pool, b1, web, 24).await;
    attach(&pool, b1, algo, 40).await;

    let rows = PromoModuleRepo::list_detailed(&pool).await.unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].promo_key(), "B1 Informatique");
    assert_eq!(rows[0].module_name, "Algorithmique");

    let groups = group_by_promo(rows);
    let keys: Vec<&str> = groups.keys().map(String::as_str).collect();
    assert_eq!(keys, ["B1 Informatique", "M2 Marketing"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_deleting_promo_cascades_promo_modules(pool: PgPool) {
    let promo_id = promo(&pool, PromoLevel::B3, "Cyber").await;
    let module_id = module(&pool, "Crypto").await;
    let pm_id = attach(&pool, promo_id, module_id, 12).await;

    assert!(PromoRepo::delete(&pool, promo_id).await.unwrap());
    assert!(PromoModuleRepo::find_by_id(&pool, pm_id)
        .await
        .unwrap()
        .is_none());
    assert!(ModuleRepo::find_by_id(&pool, module_id)
        .await
        .unwrap()
        .is_some());
}

use actix_web::test;
use munlink_backend::infra::db::prepare_database;
use munlink_backend::seed::LocationSource;
use munlink_backend::AppState;

use super::{create_test_app, testing_config};
use crate::common::json_body;
use crate::support::memory_db;

#[actix_web::test]
async fn health_reports_migration_and_seed_state() {
    let db = memory_db().await;
    let report = prepare_database(&db, &LocationSource::BuiltIn).await.unwrap();
    let app = create_test_app(AppState::new(db, testing_config(), report)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body = json_body(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert_eq!(body["seeded"], true);
    assert_eq!(
        body["migration"],
        migration::head_version().expect("at least one migration")
    );
    assert!(body.get("db_error").is_none());
}

#[actix_web::test]
async fn health_without_database_still_answers() {
    let app = create_test_app(AppState::without_db(testing_config())).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body = json_body(resp).await;
    assert_eq!(body["db"], "error");
    assert_eq!(body["seeded"], false);
    assert!(body["db_error"].as_str().unwrap().contains("not configured"));
}

#[actix_web::test]
async fn root_names_the_app() {
    let app = create_test_app(AppState::without_db(testing_config())).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let body = json_body(test::call_service(&app, req).await).await;
    assert_eq!(body["message"], "MunLink Test API");
}

use actix_web::{test, web, App, HttpResponse};
use munlink_backend::errors::domain::{DomainError, InfraErrorKind};
use munlink_backend::AppError;

use crate::common::json_body;

async fn failing() -> Result<HttpResponse, AppError> {
    Err(DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable").into())
}

#[actix_web::test]
async fn infrastructure_failure_has_status_and_detail() {
    let app = test::init_service(App::new().route("/fail", web::get().to(failing))).await;

    let req = test::TestRequest::get().uri("/fail").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 503);

    let body = json_body(resp).await;
    assert_eq!(body["error"], "Database unavailable");
    assert_eq!(body["details"], "Database unavailable");
}

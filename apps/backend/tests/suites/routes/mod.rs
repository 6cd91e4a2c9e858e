use std::sync::Arc;

use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App};
use munlink_backend::config::AppConfig;
use munlink_backend::routes;
use munlink_backend::AppState;

pub mod error_shape;
pub mod healthcheck;

pub fn testing_config() -> Arc<AppConfig> {
    let config = AppConfig::from_lookup(|name| match name {
        "FLASK_ENV" => Some("testing".into()),
        "APP_NAME" => Some("MunLink Test".into()),
        "REGION3_DATA_FILE" => Some("/nonexistent/region3_locations.json".into()),
        _ => None,
    })
    .expect("testing config");
    Arc::new(config)
}

pub async fn create_test_app(
    state: AppState,
) -> impl Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await
}

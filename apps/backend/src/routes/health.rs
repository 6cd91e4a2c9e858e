use actix_web::{web, HttpResponse};
use migration::get_latest_migration_version;
use sea_orm::{ConnectionTrait, DatabaseConnection};
use serde::Serialize;
use time::OffsetDateTime;

use crate::error::AppError;
use crate::repos::{ProvinceFilter, ProvinceRepo, Repo};
use crate::state::app_state::AppState;

pub async fn root(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("{} API", app_state.config.app_name),
        "status": "ok",
    })))
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    app_version: String,
    db: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    db_error: Option<String>,
    migration: String,
    seeded: bool,
    time: String,
}

async fn probe(db: &DatabaseConnection) -> Result<(String, bool), String> {
    db.query_one(sea_orm::Statement::from_string(
        db.get_database_backend(),
        "SELECT 1 as health_check".to_string(),
    ))
    .await
    .map_err(|e| format!("DB query failed: {e}"))?;

    let migration = match get_latest_migration_version(db).await {
        Ok(Some(version)) => version,
        Ok(None) => "no_migrations".to_string(),
        Err(_) => "unknown".to_string(),
    };
    let seeded = ProvinceRepo
        .count(db, &ProvinceFilter::default())
        .await
        .map(|count| count > 0)
        .unwrap_or(false);
    Ok((migration, seeded))
}

async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let app_version = env!("CARGO_PKG_VERSION").to_string();

    let time = OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    let (db, db_error, migration, seeded) = match app_state.db() {
        Ok(db) => match probe(db).await {
            Ok((migration, seeded)) => ("ok".to_string(), None, migration, seeded),
            Err(e) => ("error".to_string(), Some(e), "unknown".to_string(), false),
        },
        Err(e) => (
            "error".to_string(),
            Some(format!("DB unavailable: {}", e.detail())),
            "unknown".to_string(),
            false,
        ),
    };

    let response = HealthResponse {
        status: "ok".to_string(),
        app_version,
        db,
        db_error,
        migration,
        seeded,
        time,
    };

    Ok(HttpResponse::Ok().json(response))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}

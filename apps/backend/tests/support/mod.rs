#![allow(dead_code)]

//! Pools and configs for tests that need a real SQLite database.

use backend_test_support::sqlite::{TempSqlite, MEMORY_URL};
use munlink_backend::config::AppConfig;
use munlink_backend::infra::db::{build_pool, ConnectionConfig};
use sea_orm::DatabaseConnection;

pub const APP_NAME: &str = "munlink-tests";

/// Single-connection in-memory database with no schema.
pub async fn memory_db() -> DatabaseConnection {
    open(MEMORY_URL).await
}

/// A fresh pool on an existing (possibly empty) database.
pub async fn open(url: &str) -> DatabaseConnection {
    let conn = ConnectionConfig::parse(url).expect("valid test url");
    build_pool(&conn, &conn.pool_options(), APP_NAME)
        .await
        .expect("build test pool")
}

/// Configuration pointing at `db` with no region dataset.
pub fn config_for(db: &TempSqlite) -> AppConfig {
    let url = db.url();
    AppConfig::from_lookup(move |name| match name {
        "FLASK_ENV" => Some("production".into()),
        "DATABASE_URL" => Some(url.clone()),
        "REGION3_DATA_FILE" => Some("/nonexistent/region3_locations.json".into()),
        _ => None,
    })
    .expect("valid test config")
}

use munlink_backend::infra::db::ensure_schema;
use sea_orm::DatabaseConnection;

use crate::support::memory_db;

pub mod barangays;
pub mod locations;
pub mod reference;

/// In-memory database with the schema but no rows.
pub async fn empty_schema() -> DatabaseConnection {
    let db = memory_db().await;
    ensure_schema(&db).await.expect("schema");
    db
}

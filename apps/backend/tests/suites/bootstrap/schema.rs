use migration::{count_applied_migrations, get_latest_migration_version, head_version, Migrator, MigratorTrait};
use munlink_backend::infra::db::{ensure_schema, prepare_database, SchemaOutcome};
use munlink_backend::infra::db_errors::is_undefined_table;
use munlink_backend::seed::LocationSource;
use munlink_backend::AppError;
use sea_orm::{ConnectionTrait, DbBackend, Statement};

use crate::support::memory_db;

async fn table_exists(db: &sea_orm::DatabaseConnection, table: &str) -> bool {
    let row = db
        .query_one(Statement::from_sql_and_values(
            DbBackend::Sqlite,
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?",
            [table.into()],
        ))
        .await
        .unwrap();
    row.is_some()
}

#[tokio::test]
async fn missing_table_error_is_recognised() {
    let db = memory_db().await;
    let err = db
        .query_one(Statement::from_string(
            DbBackend::Sqlite,
            "SELECT id FROM provinces LIMIT 1",
        ))
        .await
        .unwrap_err();
    assert!(is_undefined_table(&err), "{err}");
}

#[tokio::test]
async fn empty_database_gets_schema_and_stamp() {
    let db = memory_db().await;

    assert_eq!(ensure_schema(&db).await.unwrap(), SchemaOutcome::Created);

    for table in [
        "provinces",
        "municipalities",
        "barangays",
        "document_types",
        "issue_categories",
        "benefit_programs",
    ] {
        assert!(table_exists(&db, table).await, "{table} missing");
    }
    assert_eq!(
        count_applied_migrations(&db).await.unwrap(),
        Migrator::migrations().len()
    );
    assert_eq!(get_latest_migration_version(&db).await.unwrap(), head_version());
}

#[tokio::test]
async fn existing_schema_is_left_alone() {
    let db = memory_db().await;
    ensure_schema(&db).await.unwrap();

    assert_eq!(ensure_schema(&db).await.unwrap(), SchemaOutcome::Present);
    assert_eq!(
        count_applied_migrations(&db).await.unwrap(),
        Migrator::migrations().len()
    );
}

#[tokio::test]
async fn other_read_failures_abort_instead_of_creating() {
    let db = memory_db().await;
    // A provinces table that exists but cannot satisfy the probe read
    db.execute(Statement::from_string(
        DbBackend::Sqlite,
        "CREATE TABLE provinces (id INTEGER PRIMARY KEY)",
    ))
    .await
    .unwrap();

    let err = prepare_database(&db, &LocationSource::BuiltIn)
        .await
        .unwrap_err();
    assert!(!matches!(err, AppError::DbUnavailable { .. }));
    assert!(!table_exists(&db, "document_types").await);
    assert!(!table_exists(&db, "seaql_migrations").await);
}

pub use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{self, ActiveModelTrait, ActiveValue, Statement};
use sea_orm_migration::seaql_migrations;
pub use sea_orm_migration::sea_orm::{ConnectionTrait, DatabaseConnection};

mod m20250901_000001_init; // keep filename + module name in sync
mod m20260102_000001_benefit_program_image;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250901_000001_init::Migration),
            Box::new(m20260102_000001_benefit_program_image::Migration),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationCommand {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
    /// Record every known migration as applied without running it.
    Stamp,
}

/// Migration function that bypasses environment parsing
/// Used by both CLI and tests
pub async fn migrate(db: &DatabaseConnection, command: MigrationCommand) -> Result<(), DbErr> {
    let db_info_before = get_db_diagnostics(db).await?;

    tracing::info!(
        "migrate=begin cmd={command:?} profile={} db={}",
        db_info_before.profile,
        db_info_before.name
    );
    tracing::info!(
        "migrate=before defined={} applied={}",
        db_info_before.defined_migrations_count,
        db_info_before.mig_count
    );

    let result = match command {
        MigrationCommand::Up => Migrator::up(db, None).await,
        MigrationCommand::Down => Migrator::down(db, None).await,
        MigrationCommand::Fresh => Migrator::fresh(db).await,
        MigrationCommand::Reset => Migrator::reset(db).await,
        MigrationCommand::Refresh => Migrator::refresh(db).await,
        MigrationCommand::Status => Migrator::status(db).await,
        MigrationCommand::Stamp => stamp_head(db).await.map(|_| ()),
    };

    match result {
        Ok(()) => {
            // Status doesn't change state
            if !matches!(command, MigrationCommand::Status) {
                let db_info_after = get_db_diagnostics(db).await?;
                tracing::info!(
                    "migrate=after defined={} applied={}",
                    db_info_after.defined_migrations_count,
                    db_info_after.mig_count
                );
            }
            tracing::info!("migrate=ok cmd={command:?} profile={}", db_info_before.profile);
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "migrate=failed cmd={command:?} profile={} error={e}",
                db_info_before.profile
            );
            Err(e)
        }
    }
}

#[derive(Debug)]
struct DbDiagnostics {
    profile: String,
    name: String,
    mig_count: usize,
    defined_migrations_count: usize,
}

async fn get_db_diagnostics(db: &DatabaseConnection) -> Result<DbDiagnostics, DbErr> {
    let backend = db.get_database_backend();
    let profile = format!("{backend:?}");

    let name = match backend {
        sea_orm::DatabaseBackend::Postgres => {
            let stmt = Statement::from_string(backend, "select current_database() as name");
            match db.query_one(stmt).await? {
                Some(row) => row.try_get("", "name")?,
                None => "<unknown>".to_string(),
            }
        }
        sea_orm::DatabaseBackend::Sqlite => {
            let stmt = Statement::from_string(
                backend,
                "SELECT file FROM pragma_database_list WHERE name = 'main'",
            );
            match db.query_one(stmt).await? {
                Some(row) => match row.try_get::<String>("", "file") {
                    Ok(file) if file.is_empty() => ":memory:".to_string(),
                    Ok(file) => file,
                    Err(_) => "<unknown>".to_string(),
                },
                None => "<unknown>".to_string(),
            }
        }
        _ => "<unsupported>".to_string(),
    };

    let applied_migrations_count = count_applied_migrations(db).await.unwrap_or(0);
    let defined_migrations_count = Migrator::migrations().len();

    Ok(DbDiagnostics {
        profile,
        name,
        mig_count: applied_migrations_count,
        defined_migrations_count,
    })
}

/// Count the number of migrations that have been applied to the database.
/// Returns 0 if the migration table doesn't exist yet.
pub async fn count_applied_migrations(db: &DatabaseConnection) -> Result<usize, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.len()),
        Err(DbErr::Exec(_)) => Ok(0),
        Err(e) => Err(e),
    }
}

/// Get the version string of the latest applied migration.
/// Returns None if no migrations have been applied or the migration table doesn't exist.
pub async fn get_latest_migration_version(
    db: &DatabaseConnection,
) -> Result<Option<String>, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.last().map(|m| m.name().to_string())),
        Err(DbErr::Exec(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Name of the newest migration this binary knows about.
pub fn head_version() -> Option<String> {
    Migrator::migrations()
        .last()
        .map(|m| m.name().to_string())
}

/// Mark the live schema as matching the newest known migration.
///
/// Used after tables were created straight from the entity definitions:
/// every pending migration is recorded as applied without running its `up`,
/// so later incremental migrations start from this baseline. Already
/// recorded versions are left untouched, which makes stamping idempotent.
pub async fn stamp_head(db: &DatabaseConnection) -> Result<Option<String>, DbErr> {
    Migrator::install(db).await?;

    let pending = Migrator::get_pending_migrations(db).await?;
    let applied_at = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default();

    for migration in &pending {
        seaql_migrations::ActiveModel {
            version: ActiveValue::Set(migration.name().to_string()),
            applied_at: ActiveValue::Set(applied_at),
        }
        .insert(db)
        .await?;
    }

    tracing::info!(stamped = pending.len(), "migrate=stamp");
    Ok(head_version())
}

#[cfg(test)]
mod tests {
    use sea_orm_migration::sea_orm::{ConnectOptions, Database};

    use super::*;

    async fn memory_db() -> DatabaseConnection {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.min_connections(1).max_connections(1).sqlx_logging(false);
        Database::connect(opt).await.unwrap()
    }

    #[tokio::test]
    async fn stamp_records_every_known_migration_once() {
        let db = memory_db().await;

        let head = stamp_head(&db).await.unwrap();
        assert_eq!(head, head_version());
        assert_eq!(
            count_applied_migrations(&db).await.unwrap(),
            Migrator::migrations().len()
        );

        stamp_head(&db).await.unwrap();
        assert_eq!(
            count_applied_migrations(&db).await.unwrap(),
            Migrator::migrations().len()
        );
        assert_eq!(get_latest_migration_version(&db).await.unwrap(), head);
    }

    #[tokio::test]
    async fn up_then_reset_round_trips_on_sqlite() {
        let db = memory_db().await;

        migrate(&db, MigrationCommand::Up).await.unwrap();
        assert_eq!(
            count_applied_migrations(&db).await.unwrap(),
            Migrator::migrations().len()
        );
        assert_eq!(
            get_latest_migration_version(&db).await.unwrap().as_deref(),
            Some("m20260102_000001_benefit_program_image")
        );

        migrate(&db, MigrationCommand::Reset).await.unwrap();
        assert_eq!(count_applied_migrations(&db).await.unwrap(), 0);
    }
}

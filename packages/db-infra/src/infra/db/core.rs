use std::future::Future;
use std::time::{Duration, Instant};

use migration::{count_applied_migrations, migrate, MigrationCommand, Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::config::db::{ConnectionConfig, DbKind};
use crate::error::DbInfraError;

fn get_db_engine(db_kind: DbKind) -> &'static str {
    match db_kind {
        DbKind::Postgres => "postgresql",
        DbKind::SqliteFile | DbKind::SqliteMemory => "sqlite",
    }
}

/// Retry `connect_fn` at a fixed interval, returning the last error.
pub async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, DbInfraError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbInfraError>>,
{
    let mut last_error = None;

    for attempt in 1..=max_attempts {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(
                        "connection_retry=success attempts={} interval_ms={}",
                        attempt, interval_ms
                    );
                }
                return Ok(result);
            }
            Err(e) => {
                last_error = Some(e);
                if attempt < max_attempts {
                    warn!(
                        "connection_retry=failed attempt={} max_attempts={} interval_ms={}",
                        attempt, max_attempts, interval_ms
                    );
                    tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                }
            }
        }
    }

    Err(last_error.unwrap_or_else(|| DbInfraError::Connect {
        message: "no error recorded after max attempts".to_string(),
    }))
}

/// Single-connection pool used for schema operations.
///
/// Postgres gets a few connect retries since a hosted instance may still be
/// waking up; SQLite is local and either opens or does not.
pub async fn build_admin_pool(conn: &ConnectionConfig) -> Result<DatabaseConnection, DbInfraError> {
    let options = conn.pool_options();

    let mut opt = ConnectOptions::new(conn.normalized_url.clone());
    opt.min_connections(1)
        .max_connections(1)
        .test_before_acquire(options.pre_ping)
        .acquire_timeout(options.acquire_timeout().unwrap_or(Duration::from_secs(2)))
        .sqlx_logging(false);
    if let Some(connect_timeout) = options.connect_timeout() {
        opt.connect_timeout(connect_timeout);
    }

    if conn.is_postgres() {
        retry_connection(
            || {
                let opt_clone = opt.clone();
                async move {
                    Database::connect(opt_clone)
                        .await
                        .map_err(|e| DbInfraError::Connect {
                            message: format!("failed to connect to Postgres (admin pool): {e}"),
                        })
                }
            },
            5,
            500,
        )
        .await
    } else {
        Database::connect(opt)
            .await
            .map_err(|e| DbInfraError::Connect {
                message: format!("failed to connect to database (admin pool): {e}"),
            })
    }
}

/// Sanitize database URL by masking password in connection strings.
///
/// The userinfo ends at the last '@' of the authority, so a password that
/// itself contains '@' is masked in full and an '@' in the query is ignored.
pub fn sanitize_db_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let (authority, tail) = rest.split_at(authority_end);

    match authority.rsplit_once('@') {
        Some((userinfo, host)) => match userinfo.split_once(':') {
            Some((user, _password)) => format!("{scheme}://{user}:***@{host}{tail}"),
            None => url.to_string(),
        },
        None => url.to_string(),
    }
}

/// Run one migration command against the database named by `conn`.
pub async fn orchestrate_migration(
    conn: &ConnectionConfig,
    command: MigrationCommand,
) -> Result<(), DbInfraError> {
    let pool = build_admin_pool(conn).await?;
    let start = Instant::now();

    info!(
        "migrate=start db_kind={:?} engine={} url={}",
        conn.kind,
        get_db_engine(conn.kind),
        conn.redacted()
    );

    if matches!(conn.kind, DbKind::SqliteFile) {
        setup_sqlite_file_prerequisites(&pool).await?;
    }

    migrate(&pool, command)
        .await
        .map_err(|e| DbInfraError::Config {
            message: format!("migration execution failed: {e}"),
        })?;

    let expected_count = Migrator::migrations().len();
    let applied_count = count_applied_migrations(&pool).await.unwrap_or(0);
    info!(
        migrate = "counts",
        expected_count = expected_count,
        applied_count = applied_count,
        elapsed_ms = start.elapsed().as_millis()
    );

    match command {
        MigrationCommand::Reset if applied_count != 0 => Err(DbInfraError::Config {
            message: format!(
                "Migration verification failed: reset should leave 0 migrations applied, but {applied_count} were found"
            ),
        }),
        MigrationCommand::Up
        | MigrationCommand::Fresh
        | MigrationCommand::Refresh
        | MigrationCommand::Stamp
            if applied_count != expected_count =>
        {
            Err(DbInfraError::Config {
                message: format!(
                    "Migration verification failed: expected {expected_count} migrations, but {applied_count} were applied"
                ),
            })
        }
        _ => {
            info!("migrate=done");
            Ok(())
        }
    }
}

async fn setup_sqlite_file_prerequisites(pool: &DatabaseConnection) -> Result<(), DbInfraError> {
    use sea_orm::{DatabaseBackend, Statement};

    for pragma in ["PRAGMA journal_mode = WAL;", "PRAGMA synchronous = NORMAL;"] {
        pool.execute(Statement::from_string(DatabaseBackend::Sqlite, pragma))
            .await
            .map_err(|e| DbInfraError::Config {
                message: format!("failed to apply '{pragma}': {e}"),
            })?;
    }

    Ok(())
}

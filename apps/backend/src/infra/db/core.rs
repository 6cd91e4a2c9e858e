use std::process;
use std::str::FromStr;
use std::time::{Duration, Instant};

use db_infra::{build_session_statements, retry_connection, DbInfraError};
use migration::{count_applied_migrations, stamp_head, Migrator, MigratorTrait};
use sea_orm::{DatabaseConnection, EntityTrait, SqlxPostgresConnector, SqlxSqliteConnector};
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use tracing::{info, trace, warn};

use super::{ConnectionConfig, DbKind, EnginePoolOptions};
use crate::config::AppConfig;
use crate::entities::provinces;
use crate::error::AppError;
use crate::infra::db_errors::is_undefined_table;
use crate::infra::schema::create_all;
use crate::seed::{ensure_seeded, LocationSource, SeedOutcome};

const SQLITE_FILE_POOL_MAX: u32 = 5;
const SQLITE_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// How the schema check at startup resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaOutcome {
    /// Tables already existed
    Present,
    /// Tables were created from the entities and stamped at head
    Created,
}

/// Which path the startup bootstrap took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapReport {
    pub schema: SchemaOutcome,
    pub seed: SeedOutcome,
}

fn get_db_engine(db_kind: DbKind) -> &'static str {
    match db_kind {
        DbKind::Postgres => "postgresql",
        DbKind::SqliteFile | DbKind::SqliteMemory => "sqlite",
    }
}

/// Build the application pool from resolved engine options.
///
/// Every new connection runs the session statements for its engine. An
/// in-memory SQLite database lives on exactly one connection that is never
/// recycled, since each connection would otherwise open its own empty
/// database.
pub async fn build_pool(
    conn: &ConnectionConfig,
    options: &EnginePoolOptions,
    app_name: &str,
) -> Result<DatabaseConnection, AppError> {
    let statements = build_session_statements(conn.kind, app_name, options);

    match conn.kind {
        // ---------- SQLite (file and in-memory) ----------
        DbKind::SqliteFile | DbKind::SqliteMemory => {
            let memory = conn.kind == DbKind::SqliteMemory;
            let mut connect_opts = SqliteConnectOptions::from_str(&conn.normalized_url)
                .map_err(|e| AppError::config(format!("invalid SQLite connection options: {e}")))?
                .create_if_missing(true)
                .foreign_keys(true);
            if !memory {
                connect_opts = connect_opts.journal_mode(SqliteJournalMode::Wal);
            }

            let (min, max) = if memory { (1, 1) } else { (0, SQLITE_FILE_POOL_MAX) };
            let mut pool_opts = SqlitePoolOptions::new()
                .min_connections(min)
                .max_connections(max)
                .test_before_acquire(options.pre_ping)
                .acquire_timeout(SQLITE_ACQUIRE_TIMEOUT);
            if memory {
                pool_opts = pool_opts.idle_timeout(None).max_lifetime(None);
            }

            let pool = pool_opts
                .after_connect(move |conn, _meta| {
                    let statements = statements.clone();
                    Box::pin(async move {
                        for stmt in &statements {
                            sqlx::query(stmt.as_str()).execute(&mut *conn).await?;
                        }
                        trace!("db=sqlite hook=after_connect ok");
                        Ok::<_, sqlx::Error>(())
                    })
                })
                .connect_with(connect_opts)
                .await
                .map_err(|e| AppError::config(format!("failed to create SQLite connection pool: {e}")))?;

            info!(
                "pool=create engine=sqlite url={} min={} max={} pre_ping={}",
                conn.redacted(),
                min,
                max,
                options.pre_ping
            );
            Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
        }

        // ---------- Postgres ----------
        DbKind::Postgres => {
            let mut pool_opts = PgPoolOptions::new().test_before_acquire(options.pre_ping);
            if let Some(size) = options.pool_size {
                pool_opts = pool_opts.min_connections(size);
            }
            if let Some(max) = options.max_connections() {
                pool_opts = pool_opts.max_connections(max);
            }
            if let Some(recycle) = options.recycle() {
                pool_opts = pool_opts.max_lifetime(recycle);
            }
            if let Some(timeout) = options.acquire_timeout() {
                pool_opts = pool_opts.acquire_timeout(timeout);
            }
            let pool_opts = pool_opts.after_connect(move |conn, _meta| {
                let statements = statements.clone();
                Box::pin(async move {
                    for stmt in &statements {
                        sqlx::query(stmt.as_str()).execute(&mut *conn).await?;
                    }
                    Ok::<_, sqlx::Error>(())
                })
            });

            info!(
                "pool=connecting engine=postgres url={} min={:?} max={:?} connect_timeout_s={:?}",
                conn.redacted(),
                options.pool_size,
                options.max_connections(),
                options.connect_timeout
            );

            // Hosted instances may still be waking up: a few bounded attempts.
            let connect_timeout = options.connect_timeout();
            let sqlx_pool = retry_connection(
                || {
                    let pool_opts = pool_opts.clone();
                    let url = conn.normalized_url.clone();
                    async move {
                        let connect = pool_opts.connect(&url);
                        let result = match connect_timeout {
                            Some(limit) => tokio::time::timeout(limit, connect)
                                .await
                                .map_err(|_| DbInfraError::Connect {
                                    message: format!(
                                        "timed out after {}s connecting to Postgres",
                                        limit.as_secs()
                                    ),
                                })?,
                            None => connect.await,
                        };
                        result.map_err(|e| DbInfraError::Connect {
                            message: format!("failed to connect to Postgres: {e}"),
                        })
                    }
                },
                5,
                500,
            )
            .await?;

            info!(
                "pool=create engine=postgres url={} min={:?} max={:?}",
                conn.redacted(),
                options.pool_size,
                options.max_connections()
            );
            Ok(SqlxPostgresConnector::from_sqlx_postgres_pool(sqlx_pool))
        }
    }
}

/// Make sure the schema exists, creating and stamping it when it does not.
///
/// Only an undefined-table error counts as absence; any other failure of the
/// probe read is returned so an outage is never treated as an empty database.
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<SchemaOutcome, AppError> {
    match provinces::Entity::find().one(db).await {
        Ok(_) => {
            warn_on_migration_drift(db).await;
            info!("schema=present");
            Ok(SchemaOutcome::Present)
        }
        Err(e) if is_undefined_table(&e) => {
            info!("schema=missing action=create_all");
            create_all(db)
                .await
                .map_err(|e| AppError::db(format!("failed to create schema: {e}")))?;
            let stamped = stamp_head(db)
                .await
                .map_err(|e| AppError::db(format!("failed to stamp schema version: {e}")))?;
            info!(
                "schema=created stamped={}",
                stamped.as_deref().unwrap_or("none")
            );
            Ok(SchemaOutcome::Created)
        }
        Err(e) => {
            warn!("schema=check_failed error={}", e);
            Err(AppError::from(e))
        }
    }
}

async fn warn_on_migration_drift(db: &DatabaseConnection) {
    let known = Migrator::migrations().len();
    match count_applied_migrations(db).await {
        Ok(applied) if applied == known => {
            trace!("schema=migrations_current applied={}", applied);
        }
        Ok(applied) => warn!(
            "schema=migration_drift applied={} known={} hint=run_migration_cli",
            applied, known
        ),
        Err(e) => warn!("schema=migrations_unreadable error={}", e),
    }
}

/// Schema check followed by the seed check, on an existing pool.
pub async fn prepare_database(
    db: &DatabaseConnection,
    source: &LocationSource,
) -> Result<BootstrapReport, AppError> {
    let schema = ensure_schema(db).await?;
    let seed = ensure_seeded(db, source).await?;
    Ok(BootstrapReport { schema, seed })
}

/// Build the application pool and bring the database to READY.
///
/// Returns only once the schema exists and the seed check has run; seed group
/// failures are reported in the returned [`BootstrapReport`], not as errors.
pub async fn bootstrap_db(
    config: &AppConfig,
) -> Result<(DatabaseConnection, BootstrapReport), AppError> {
    let start = Instant::now();
    info!(
        "bootstrap=start env={:?} db_kind={:?} engine={} url={} pid={}",
        config.environment,
        config.database.kind,
        get_db_engine(config.database.kind),
        config.database.redacted(),
        process::id()
    );

    let db = build_pool(&config.database, &config.pool, &config.app_name).await?;
    let source = LocationSource::load(&config.region3_data_file);
    let report = prepare_database(&db, &source).await?;

    info!(
        "bootstrap=ready schema={:?} seeded={} elapsed_ms={}",
        report.schema,
        matches!(report.seed, SeedOutcome::Seeded(_)),
        start.elapsed().as_millis()
    );
    Ok((db, report))
}

//! Shared database configuration and migration infrastructure.
//! Used by the backend and the migration CLI.

pub mod config;
pub mod error;
pub mod infra;

pub use config::db;
pub use config::db::{
    build_session_statements, database_url_from_env, engine_options, normalize_database_url,
    required_database_url_from_env, ConnectionConfig, DbKind, EnginePoolOptions,
    KeepaliveSettings, DEFAULT_DATABASE_URL,
};
pub use error::DbInfraError;
pub use infra::db::core::{build_admin_pool, orchestrate_migration, retry_connection, sanitize_db_url};

//! Database infrastructure - pool construction and startup bootstrap.

pub mod core;

pub use core::{
    bootstrap_db, build_pool, ensure_schema, prepare_database, BootstrapReport, SchemaOutcome,
};
pub use db_infra::{ConnectionConfig, DbKind, EnginePoolOptions};

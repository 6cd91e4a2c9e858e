#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod entities;
pub mod error;
pub mod errors;
pub mod infra;
pub mod notify;
pub mod repos;
pub mod routes;
pub mod seed;
pub mod state;
pub mod telemetry;

// Re-exports for public API
pub use config::AppConfig;
pub use error::AppError;
pub use errors::domain::DomainError;
pub use infra::db::{bootstrap_db, build_pool, prepare_database, BootstrapReport, SchemaOutcome};
pub use infra::state::{build_state, StateBuilder};
pub use seed::{LocationSource, SeedOutcome, SeedReport};
pub use state::app_state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}

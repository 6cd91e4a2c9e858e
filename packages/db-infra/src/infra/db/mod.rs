pub mod core;

pub use core::{build_admin_pool, orchestrate_migration, sanitize_db_url};

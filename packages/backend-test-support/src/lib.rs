//! Backend test support utilities
//!
//! Unified logging initialisation and throwaway SQLite databases shared by
//! the unit and integration tests of the workspace.

pub mod logging;
pub mod sqlite;

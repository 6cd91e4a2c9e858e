//! Throwaway SQLite databases for tests.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// In-memory database; only visible to the connection that opened it.
pub const MEMORY_URL: &str = "sqlite::memory:";

/// A SQLite file inside a private temp directory, removed on drop.
///
/// Unlike [`MEMORY_URL`], the same database can be opened by several pools
/// in turn, which is what restart scenarios need.
pub struct TempSqlite {
    _dir: TempDir,
    path: PathBuf,
}

impl TempSqlite {
    pub fn new() -> io::Result<Self> {
        let dir = tempfile::Builder::new().prefix("munlink-test-").tempdir()?;
        let path = dir.path().join("munlink.db");
        tracing::debug!(path = %path.display(), "test_db=created");
        Ok(Self { _dir: dir, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn url(&self) -> String {
        format!("sqlite://{}", self.path.display())
    }
}

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::infra::db::BootstrapReport;
use crate::notify::{LogMailer, Mailer};

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Database connection (optional for test scenarios)
    pub db: Option<DatabaseConnection>,
    /// Immutable configuration built once at startup
    pub config: Arc<AppConfig>,
    pub mailer: Arc<dyn Mailer>,
    /// What the startup bootstrap did, when it ran
    pub bootstrap: Option<BootstrapReport>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: Arc<AppConfig>, bootstrap: BootstrapReport) -> Self {
        Self {
            db: Some(db),
            config,
            mailer: Arc::new(LogMailer),
            bootstrap: Some(bootstrap),
        }
    }

    /// State without a database connection (for testing)
    pub fn without_db(config: Arc<AppConfig>) -> Self {
        Self {
            db: None,
            config,
            mailer: Arc::new(LogMailer),
            bootstrap: None,
        }
    }

    pub fn with_mailer(mut self, mailer: Arc<dyn Mailer>) -> Self {
        self.mailer = mailer;
        self
    }

    pub fn db(&self) -> Result<&DatabaseConnection, AppError> {
        self.db
            .as_ref()
            .ok_or_else(|| AppError::db_unavailable("database connection not configured"))
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("db", &self.db.is_some())
            .field("environment", &self.config.environment)
            .field("bootstrap", &self.bootstrap)
            .finish()
    }
}

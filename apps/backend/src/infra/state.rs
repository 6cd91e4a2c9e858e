use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::notify::{mailer_for, Mailer};
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    config: Option<AppConfig>,
    with_db: bool,
    mailer: Option<Arc<dyn Mailer>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            config: None,
            with_db: false,
            mailer: None,
        }
    }
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }
    /// Connect and bootstrap the configured database during `build`.
    pub fn with_db(mut self) -> Self {
        self.with_db = true;
        self
    }
    pub fn with_mailer(mut self, mailer: Arc<dyn Mailer>) -> Self {
        self.mailer = Some(mailer);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let config = match self.config {
            Some(config) => Arc::new(config),
            None => Arc::new(AppConfig::from_env()?),
        };

        let state = if self.with_db {
            // single entrypoint: pool + schema + seed
            let (conn, report) = bootstrap_db(&config).await?;
            AppState::new(conn, config, report)
        } else {
            AppState::without_db(config)
        };

        let mailer = self.mailer.unwrap_or_else(|| mailer_for(&state.config));
        Ok(state.with_mailer(mailer))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}

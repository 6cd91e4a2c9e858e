use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbInfraError {
    #[error("Configuration error: {message}")]
    Config { message: String },
    #[error("Invalid database URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("Unsupported database scheme '{scheme}'")]
    UnsupportedScheme { scheme: String },
    #[error("Connection error: {message}")]
    Connect { message: String },
}

impl DbInfraError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::errors::domain::{DomainError, InfraErrorKind};

/// JSON error body returned by every failing route.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub details: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Database unavailable: {detail}")]
    DbUnavailable { detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: &'static str, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { detail: String },
    #[error("Bad request: {detail}")]
    BadRequest { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    /// Email could not be handed to the transport
    #[error("Email delivery failed: {detail}")]
    Email { detail: String },
}

impl AppError {
    /// Short operator-facing title for the error body
    fn title(&self) -> &'static str {
        match self {
            AppError::Config { .. } => "Configuration error",
            AppError::Db { .. } => "Database error",
            AppError::DbUnavailable { .. } => "Database unavailable",
            AppError::NotFound { code, .. } => code,
            AppError::Conflict { .. } => "Conflict",
            AppError::BadRequest { .. } => "Bad request",
            AppError::Internal { .. } => "Internal error",
            AppError::Email { .. } => "Failed to send email",
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            AppError::Config { detail }
            | AppError::Db { detail }
            | AppError::DbUnavailable { detail }
            | AppError::NotFound { detail, .. }
            | AppError::Conflict { detail }
            | AppError::BadRequest { detail }
            | AppError::Internal { detail }
            | AppError::Email { detail } => detail,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::DbUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Config { .. }
            | AppError::Db { .. }
            | AppError::Internal { .. }
            | AppError::Email { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn db(detail: impl Into<String>) -> Self {
        Self::Db {
            detail: detail.into(),
        }
    }

    pub fn db_unavailable(detail: impl Into<String>) -> Self {
        Self::DbUnavailable {
            detail: detail.into(),
        }
    }

    pub fn not_found(code: &'static str, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn email(detail: impl Into<String>) -> Self {
        Self::Email {
            detail: detail.into(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(detail) => AppError::BadRequest { detail },
            DomainError::Conflict(_, detail) => AppError::Conflict { detail },
            DomainError::NotFound(kind, detail) => AppError::not_found(kind.label(), detail),
            DomainError::Infra(InfraErrorKind::DbUnavailable | InfraErrorKind::Timeout, detail) => {
                AppError::db_unavailable(detail)
            }
            DomainError::Infra(_, detail) => AppError::db(detail),
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::from(crate::infra::db_errors::map_db_err(e))
    }
}

impl From<db_infra::DbInfraError> for AppError {
    fn from(e: db_infra::DbInfraError) -> Self {
        match e {
            db_infra::DbInfraError::Connect { message } => AppError::db_unavailable(message),
            other => AppError::config(other.to_string()),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status()).json(ErrorBody {
            error: self.title().to_string(),
            details: self.detail().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::domain::{ConflictKind, NotFoundKind};

    #[test]
    fn infrastructure_errors_are_server_errors() {
        for err in [
            AppError::config("x"),
            AppError::db("x"),
            AppError::internal("x"),
            AppError::email("x"),
        ] {
            assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
        assert_eq!(
            AppError::db_unavailable("x").status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn domain_errors_map_onwards() {
        let conflict = AppError::from(DomainError::conflict(ConflictKind::DuplicateKey, "dup"));
        assert_eq!(conflict.status(), StatusCode::CONFLICT);

        let missing = AppError::from(DomainError::not_found(NotFoundKind::Province, "id 9"));
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(missing.title(), "Province not found");

        let down = AppError::from(DomainError::infra(InfraErrorKind::DbUnavailable, "down"));
        assert_eq!(down.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[actix_web::test]
    async fn error_body_has_error_and_details() {
        let resp = AppError::email("smtp refused").error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Failed to send email");
        assert_eq!(json["details"], "smtp refused");
    }
}

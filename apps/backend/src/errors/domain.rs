//! Storage-agnostic errors raised by the repositories and the seeder.
//!
//! Nothing here knows about HTTP status codes or SQL error codes; the
//! conversions live in `crate::error` and `crate::infra::db_errors`.

use thiserror::Error;

/// Operational failures of the database layer
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    DbUnavailable,
    /// The table being read does not exist yet
    SchemaMissing,
    Other(String),
}

/// The reference record a lookup was for
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Province,
    Municipality,
    Barangay,
    DocumentType,
    IssueCategory,
    BenefitProgram,
    Other(String),
}

impl NotFoundKind {
    /// Title used in the error body
    pub fn label(&self) -> &'static str {
        match self {
            NotFoundKind::Province => "Province not found",
            NotFoundKind::Municipality => "Municipality not found",
            NotFoundKind::Barangay => "Barangay not found",
            NotFoundKind::DocumentType => "Document type not found",
            NotFoundKind::IssueCategory => "Issue category not found",
            NotFoundKind::BenefitProgram => "Benefit program not found",
            NotFoundKind::Other(_) => "Not found",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    /// A natural key (slug, code) already exists
    DuplicateKey,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Rejected input, including rows whose parent does not exist
    #[error("validation error: {0}")]
    Validation(String),
    #[error("conflict {0:?}: {1}")]
    Conflict(ConflictKind, String),
    #[error("not found {0:?}: {1}")]
    NotFound(NotFoundKind, String),
    #[error("infra {0:?}: {1}")]
    Infra(InfraErrorKind, String),
}

impl DomainError {
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation(detail.into())
    }

    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }

    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }

    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    pub fn is_schema_missing(&self) -> bool {
        matches!(self, DomainError::Infra(InfraErrorKind::SchemaMissing, _))
    }
}

//! SeaORM -> DomainError translation helpers.
//!
//! Repositories convert `sea_orm::DbErr` into `DomainError` here, and higher
//! layers map `DomainError` to `AppError` via `From`.

use sea_orm::{DbErr, RuntimeErr};
use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};

/// Postgres SQLSTATE for `undefined_table`.
const PG_UNDEFINED_TABLE: &str = "42P01";
/// Prefix of SQLite's diagnostic for a missing table.
const SQLITE_NO_SUCH_TABLE: &str = "no such table";

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Extract table.column from SQLite "UNIQUE constraint failed: table.column" error messages.
fn extract_sqlite_table_column(error_msg: &str) -> Option<&str> {
    let prefix = error_msg.find("UNIQUE constraint failed: ")?;
    let rest = &error_msg[prefix + "UNIQUE constraint failed: ".len()..];
    rest.split_whitespace().next()
}

fn database_error(e: &DbErr) -> Option<&dyn sqlx::error::DatabaseError> {
    match e {
        DbErr::Query(RuntimeErr::SqlxError(sqlx::Error::Database(db)))
        | DbErr::Exec(RuntimeErr::SqlxError(sqlx::Error::Database(db))) => Some(db.as_ref()),
        _ => None,
    }
}

/// True only when `e` says the queried relation does not exist.
///
/// Connection, permission and every other failure return false so they are
/// never mistaken for an empty database.
pub fn is_undefined_table(e: &DbErr) -> bool {
    match database_error(e) {
        Some(db) => {
            db.code().as_deref() == Some(PG_UNDEFINED_TABLE)
                || db.message().starts_with(SQLITE_NO_SUCH_TABLE)
        }
        None => {
            // Errors that were flattened to text by a wrapping layer
            let msg = e.to_string();
            msg.contains(SQLITE_NO_SUCH_TABLE)
                || (mentions_sqlstate(&msg, PG_UNDEFINED_TABLE)
                    && msg.contains("does not exist"))
        }
    }
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: DbErr) -> DomainError {
    let error_msg = e.to_string();

    match &e {
        DbErr::RecordNotFound(_) => {
            return DomainError::not_found(NotFoundKind::Other("Record".into()), "Record not found");
        }
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => {
            warn!(raw_error = %error_msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if is_undefined_table(&e) {
        warn!(raw_error = %error_msg, "Table missing");
        return DomainError::infra(InfraErrorKind::SchemaMissing, "Table does not exist");
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(raw_error = %error_msg, "Unique constraint violation");
        let detail = match extract_sqlite_table_column(&error_msg) {
            Some(table_column) => format!("Duplicate value for {table_column}"),
            None => "Unique constraint violation".to_string(),
        };
        return DomainError::conflict(ConflictKind::DuplicateKey, detail);
    }

    if mentions_sqlstate(&error_msg, "23503") || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(raw_error = %error_msg, "Foreign key constraint violation");
        return DomainError::validation("Foreign key constraint violation");
    }

    if error_msg.contains("timeout") || error_msg.contains("pool timed out") {
        warn!(raw_error = %error_msg, "Database timeout or pool issue");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(raw_error = %error_msg, "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

impl From<DbErr> for DomainError {
    fn from(e: DbErr) -> Self {
        map_db_err(e)
    }
}

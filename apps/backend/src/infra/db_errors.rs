//! SeaORM -> DomainError translation.
//!
//! Adapters return `sea_orm::DbErr`; repos convert here so higher layers
//! only ever see `DomainError`.

use sea_orm::{DbErr, SqlErr};
use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// True when a unique-violation message names the drinks title constraint,
/// in either the Postgres (index name) or SQLite (table.column) format.
fn is_title_violation(msg: &str) -> bool {
    msg.contains("ux_drinks_title") || msg.contains("drinks.title")
}

fn unique_violation(msg: &str) -> DomainError {
    if is_title_violation(msg) {
        DomainError::conflict(
            ConflictKind::UniqueTitle,
            "a drink with this title already exists",
        )
    } else {
        DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "unique constraint violation",
        )
    }
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    if let Some(SqlErr::UniqueConstraintViolation(msg)) = e.sql_err() {
        warn!(trace_id = %trace_id, raw_error = %msg, "Unique constraint violation");
        return unique_violation(&msg);
    }

    match &e {
        DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => {
            return DomainError::not_found(NotFoundKind::Other("Record".into()), "record not found");
        }
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %error_msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505") || error_msg.contains("UNIQUE constraint failed") {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Unique constraint violation");
        return unique_violation(&error_msg);
    }

    if error_msg.contains("timeout") {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Database timeout");
        return DomainError::infra(InfraErrorKind::Timeout, "database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %error_msg, "Unhandled database error");
    DomainError::infra(InfraErrorKind::Other("DbErr".into()), error_msg)
}

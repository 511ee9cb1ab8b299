use actix_web::error::ResponseError;
use actix_web::http::{header, StatusCode};
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::auth::AuthError;
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::errors::ErrorCode;
use crate::infra::db_errors::map_db_err;
use crate::trace_ctx;

/// Uniform JSON error body returned for every failure.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    /// HTTP status code, repeated in the body
    pub error: u16,
    pub code: Option<&'static str>,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),
    #[error("Unprocessable: {detail}")]
    Unprocessable { code: ErrorCode, detail: String },
    #[error("Bad request: {detail}")]
    BadRequest { code: ErrorCode, detail: String },
    /// `code` is `None` for framework-level misses (unknown route).
    #[error("Not found: {detail}")]
    NotFound {
        code: Option<ErrorCode>,
        detail: String,
    },
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Database unavailable: {detail}")]
    DbUnavailable { detail: String },
    #[error("Database timeout: {detail}")]
    Timeout { detail: String },
    #[error("Data corruption: {detail}")]
    DataCorruption { detail: String },
    #[error("Key set unavailable: {detail}")]
    KeySetUnavailable { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            AppError::Auth(e) => Some(e.code),
            AppError::Unprocessable { code, .. } => Some(*code),
            AppError::BadRequest { code, .. } => Some(*code),
            AppError::NotFound { code, .. } => *code,
            AppError::Db { .. } => Some(ErrorCode::DbError),
            AppError::DbUnavailable { .. } => Some(ErrorCode::DbUnavailable),
            AppError::Timeout { .. } => Some(ErrorCode::DbTimeout),
            AppError::DataCorruption { .. } => Some(ErrorCode::DataCorruption),
            AppError::KeySetUnavailable { .. } => Some(ErrorCode::JwksUnavailable),
            AppError::Config { .. } => Some(ErrorCode::ConfigError),
            AppError::Internal { .. } => Some(ErrorCode::InternalError),
        }
    }

    /// Client-facing message. Server-side failures get a fixed message; their
    /// detail only goes to the log.
    pub fn message(&self) -> String {
        match self {
            AppError::Auth(e) => e.description.clone(),
            AppError::Unprocessable { detail, .. } => detail.clone(),
            AppError::BadRequest { detail, .. } => detail.clone(),
            AppError::NotFound { detail, .. } => detail.clone(),
            AppError::Db { .. } | AppError::DataCorruption { .. } => {
                "database error".to_string()
            }
            AppError::DbUnavailable { .. } => "database unavailable".to_string(),
            AppError::Timeout { .. } => "database timeout".to_string(),
            AppError::KeySetUnavailable { .. } => {
                "signing keys are temporarily unavailable".to_string()
            }
            AppError::Config { .. } | AppError::Internal { .. } => {
                "internal server error".to_string()
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Auth(e) => e.status,
            AppError::Unprocessable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Db { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::DbUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            AppError::DataCorruption { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::KeySetUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn unprocessable(detail: impl Into<String>) -> Self {
        Self::Unprocessable {
            code: ErrorCode::Unprocessable,
            detail: detail.into(),
        }
    }

    pub fn bad_request(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code: Some(code),
            detail: detail.into(),
        }
    }

    /// Unknown route or method; carries no application code.
    pub fn resource_not_found() -> Self {
        Self::NotFound {
            code: None,
            detail: "resource not found".to_string(),
        }
    }

    pub fn db(detail: impl Into<String>) -> Self {
        Self::Db {
            detail: detail.into(),
        }
    }

    pub fn db_unavailable() -> Self {
        Self::DbUnavailable {
            detail: "database connection not configured".to_string(),
        }
    }

    pub fn key_set_unavailable(detail: impl Into<String>) -> Self {
        Self::KeySetUnavailable {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            success: false,
            error: self.status().as_u16(),
            code: self.code().map(|c| c.as_str()),
            message: self.message(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(_, detail) => AppError::unprocessable(detail),
            DomainError::Conflict(ConflictKind::UniqueTitle, detail) => AppError::Unprocessable {
                code: ErrorCode::TitleConflict,
                detail,
            },
            DomainError::Conflict(ConflictKind::Other(_), detail) => AppError::unprocessable(detail),
            DomainError::NotFound(NotFoundKind::Drink, detail) => {
                AppError::not_found(ErrorCode::DrinkNotFound, detail)
            }
            DomainError::NotFound(NotFoundKind::Other(_), detail) => AppError::NotFound {
                code: None,
                detail,
            },
            DomainError::Infra(InfraErrorKind::Timeout, detail) => AppError::Timeout { detail },
            DomainError::Infra(InfraErrorKind::DbUnavailable, detail) => {
                AppError::DbUnavailable { detail }
            }
            DomainError::Infra(InfraErrorKind::DataCorruption, detail) => {
                AppError::DataCorruption { detail }
            }
            DomainError::Infra(InfraErrorKind::Other(_), detail) => AppError::Db { detail },
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        map_db_err(e).into()
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let trace_id = trace_ctx::trace_id();

        if status.is_server_error() {
            error!(trace_id = %trace_id, code = ?self.code(), error = %self, "request failed");
        }

        let mut builder = HttpResponse::build(status);
        builder.insert_header(("x-trace-id", trace_id));
        if status == StatusCode::UNAUTHORIZED {
            builder.insert_header((header::WWW_AUTHENTICATE, "Bearer"));
        }
        builder.json(self.body())
    }
}

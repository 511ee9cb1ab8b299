use actix_web::http::StatusCode;
use thiserror::Error;

use crate::errors::ErrorCode;

/// Authentication or authorization failure.
///
/// Status convention: 401 for anything wrong with the credentials
/// themselves, 403 only when a valid token lacks the required scope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {description}")]
pub struct AuthError {
    pub code: ErrorCode,
    pub description: String,
    pub status: StatusCode,
}

impl AuthError {
    fn unauthorized(code: ErrorCode, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
            status: StatusCode::UNAUTHORIZED,
        }
    }

    pub fn header_missing() -> Self {
        Self::unauthorized(
            ErrorCode::AuthorizationHeaderMissing,
            "Authorization header is required",
        )
    }

    pub fn header_invalid(description: impl Into<String>) -> Self {
        Self::unauthorized(ErrorCode::AuthorizationHeaderInvalid, description)
    }

    pub fn invalid_header(description: impl Into<String>) -> Self {
        Self::unauthorized(ErrorCode::InvalidHeader, description)
    }

    pub fn expired_token() -> Self {
        Self::unauthorized(ErrorCode::ExpiredToken, "Expired token.")
    }

    pub fn invalid_claims(description: impl Into<String>) -> Self {
        Self::unauthorized(ErrorCode::InvalidClaims, description)
    }

    pub fn unauthorised() -> Self {
        Self {
            code: ErrorCode::Unauthorised,
            description: "User is not allowed to perform this action.".to_string(),
            status: StatusCode::FORBIDDEN,
        }
    }
}

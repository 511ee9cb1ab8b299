//! Error codes for the drinks API.
//!
//! Every code that can appear in an error body is defined here; never pass
//! ad-hoc strings as error codes. Codes are snake_case and map 1:1 to the
//! `code` field of the JSON error body.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// No Authorization header on a protected route
    AuthorizationHeaderMissing,
    /// Authorization header present but not `Bearer <token>`
    AuthorizationHeaderInvalid,
    /// Token header unusable: no kid, unknown kid, bad algorithm, bad signature
    InvalidHeader,
    /// Token `exp` is in the past
    ExpiredToken,
    /// Audience/issuer mismatch, missing required claim, or no `permissions`
    InvalidClaims,
    /// Required scope not granted
    Unauthorised,

    // Request Validation
    /// Body could not be parsed or failed validation
    Unprocessable,
    /// Another drink already has this title
    TitleConflict,
    /// Path id is not a positive integer
    InvalidDrinkId,

    // Resource Not Found
    DrinkNotFound,

    // System Errors
    DbError,
    DbUnavailable,
    DbTimeout,
    /// The identity provider's key set could not be fetched
    JwksUnavailable,
    /// A stored row violates an invariant (e.g. unreadable recipe)
    DataCorruption,
    ConfigError,
    InternalError,
}

impl ErrorCode {
    /// The exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AuthorizationHeaderMissing => "authorization_header_missing",
            Self::AuthorizationHeaderInvalid => "authorization_header_invalid",
            Self::InvalidHeader => "invalid_header",
            Self::ExpiredToken => "expired_token",
            Self::InvalidClaims => "invalid_claims",
            Self::Unauthorised => "unauthorised",

            Self::Unprocessable => "unprocessable",
            Self::TitleConflict => "title_conflict",
            Self::InvalidDrinkId => "invalid_drink_id",

            Self::DrinkNotFound => "drink_not_found",

            Self::DbError => "db_error",
            Self::DbUnavailable => "db_unavailable",
            Self::DbTimeout => "db_timeout",
            Self::JwksUnavailable => "jwks_unavailable",
            Self::DataCorruption => "data_corruption",
            Self::ConfigError => "config_error",
            Self::InternalError => "internal_error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

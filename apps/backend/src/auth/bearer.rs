//! Bearer token extraction from the `Authorization` header.

use actix_web::http::header::HeaderValue;

use super::AuthError;

/// Pull the raw token out of an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-insensitively; anything other than exactly two
/// whitespace-separated parts is rejected.
pub fn extract_bearer(header: Option<&HeaderValue>) -> Result<String, AuthError> {
    let value = header.ok_or_else(AuthError::header_missing)?;
    let value = value
        .to_str()
        .map_err(|_| AuthError::header_invalid("Authorization header must be visible ASCII"))?;
    parse_bearer(value).map(str::to_string)
}

/// String-level parsing, shared with callers that already hold a `&str`.
pub fn parse_bearer(value: &str) -> Result<&str, AuthError> {
    let mut parts = value.split_whitespace();
    let (scheme, token) = match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) => (scheme, token),
        _ => {
            return Err(AuthError::header_invalid(
                "Authorization header must be bearer token",
            ))
        }
    };

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::header_invalid(
            "Authorization header must start with `Bearer`",
        ));
    }

    Ok(token)
}

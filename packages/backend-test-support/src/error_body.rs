//! Assertions on the uniform JSON error body:
//! `{success:false, error:<status>, code:<string|null>, message:<string>}`.

use actix_web::http::header::HeaderMap;
use actix_web::http::StatusCode;
use serde::Deserialize;

/// Local mirror of the backend's error body so this crate does not depend on
/// backend types.
#[derive(Debug, Deserialize)]
pub struct ErrorBodyLike {
    pub success: bool,
    pub error: u16,
    pub code: Option<String>,
    pub message: String,
}

/// Parse and check an error response. Returns the parsed body for further
/// assertions.
pub fn assert_error_body(
    status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
    expected_status: StatusCode,
    expected_code: Option<&str>,
) -> ErrorBodyLike {
    assert_eq!(status, expected_status, "unexpected status");

    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with("application/json"),
        "error responses must be application/json (got {content_type})"
    );

    let body_str = std::str::from_utf8(body).expect("error body should be UTF-8");
    let parsed: ErrorBodyLike = serde_json::from_str(body_str)
        .unwrap_or_else(|_| panic!("failed to parse error body. Raw body: {body_str}"));

    assert!(!parsed.success, "success must be false on errors");
    assert_eq!(parsed.error, expected_status.as_u16());
    assert_eq!(parsed.code.as_deref(), expected_code);
    assert!(!parsed.message.is_empty(), "message must not be empty");

    if expected_status == StatusCode::UNAUTHORIZED {
        let www_auth = headers
            .get("www-authenticate")
            .and_then(|v| v.to_str().ok());
        assert_eq!(www_auth, Some("Bearer"), "401 must carry WWW-Authenticate");
    }

    parsed
}

#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::error_body::{assert_error_body, ErrorBodyLike};
use serde_json::Value;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Read a successful JSON response, asserting the status first.
pub async fn read_json<B: MessageBody>(resp: ServiceResponse<B>, expected: StatusCode) -> Value {
    let status = resp.status();
    let body = test::read_body(resp).await;
    assert_eq!(
        status,
        expected,
        "unexpected status; body: {}",
        String::from_utf8_lossy(&body)
    );
    serde_json::from_slice(&body).expect("response body should be JSON")
}

/// Check a response against the uniform error body and the trace headers.
pub async fn assert_error<B: MessageBody>(
    resp: ServiceResponse<B>,
    expected_status: u16,
    expected_code: Option<&str>,
) -> ErrorBodyLike {
    let status = resp.status();
    let headers = resp.headers().clone();

    let trace_id = headers
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .expect("x-trace-id header should be present");
    let request_id = headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .expect("x-request-id header should be present");
    assert_eq!(trace_id, request_id, "error trace id should match request id");

    let body = test::read_body(resp).await;
    assert_error_body(
        status,
        &headers,
        &body,
        StatusCode::from_u16(expected_status).expect("valid status"),
        expected_code,
    )
}

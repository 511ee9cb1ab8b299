//! Requests through the same middleware stack `main` builds.

use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::tokens::{bearer, TokenBuilder};

use crate::common::{assert_error, read_json};
use crate::support::{build_test_state, create_test_app};

fn request_id(headers: &actix_web::http::header::HeaderMap) -> String {
    headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .expect("x-request-id header")
        .to_string()
}

#[actix_web::test]
async fn public_route_succeeds_with_request_id() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;

    let first = test::call_service(&app, test::TestRequest::get().uri("/drinks").to_request()).await;
    let first_id = request_id(first.headers());
    let body = read_json(first, StatusCode::OK).await;
    assert_eq!(body["success"], true);

    let second = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(second.status(), StatusCode::OK);
    assert_ne!(request_id(second.headers()), first_id);
    Ok(())
}

#[actix_web::test]
async fn guarded_route_rejections_are_rendered() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get().uri("/drinks-detail").to_request();
    assert_error(
        test::call_service(&app, req).await,
        401,
        Some("authorization_header_missing"),
    )
    .await;

    let token = TokenBuilder::new().permissions(&["post:drinks"]).sign();
    let req = test::TestRequest::get()
        .uri("/drinks-detail")
        .insert_header(("Authorization", bearer(&token)))
        .to_request();
    assert_error(test::call_service(&app, req).await, 403, Some("unauthorised")).await;

    let token = TokenBuilder::new().permissions(&["get:drinks-detail"]).sign();
    let req = test::TestRequest::get()
        .uri("/drinks-detail")
        .insert_header(("Authorization", bearer(&token)))
        .to_request();
    let body = read_json(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["drinks"], serde_json::json!([]));
    Ok(())
}

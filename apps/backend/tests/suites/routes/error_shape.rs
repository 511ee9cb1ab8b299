use actix_web::test;
use backend_test_support::tokens::bearer;

use crate::common::assert_error;
use crate::support::drinks::manager_token;
use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn unknown_route_is_json_404() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get().uri("/cocktails").to_request();
    let body = assert_error(test::call_service(&app, req).await, 404, None).await;
    assert_eq!(body.message, "resource not found");
    Ok(())
}

#[actix_web::test]
async fn unrouted_method_falls_through_to_404() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::put()
        .uri("/drinks/1")
        .insert_header(("Authorization", bearer(&manager_token())))
        .to_request();
    assert_error(test::call_service(&app, req).await, 404, None).await;
    Ok(())
}

#[actix_web::test]
async fn every_error_carries_matching_trace_ids() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;

    // assert_error checks x-trace-id against x-request-id on each response
    let req = test::TestRequest::post().uri("/drinks").to_request();
    let first = assert_error(
        test::call_service(&app, req).await,
        401,
        Some("authorization_header_missing"),
    )
    .await;

    let req = test::TestRequest::delete()
        .uri("/drinks/77")
        .insert_header(("Authorization", bearer(&manager_token())))
        .to_request();
    let second = assert_error(test::call_service(&app, req).await, 404, Some("drink_not_found")).await;

    assert_eq!(first.error, 401);
    assert_eq!(second.error, 404);
    Ok(())
}

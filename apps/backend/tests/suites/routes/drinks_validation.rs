use actix_web::test;
use backend_test_support::tokens::bearer;
use serde_json::json;

use crate::common::assert_error;
use crate::support::drinks::{create_drink, manager_token, recipe};
use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn malformed_json_is_unprocessable() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;

    for payload in [r#"{"title": "x", "recipe": ["#, r#"{"title": 7, "recipe": []}"#, ""] {
        let req = test::TestRequest::post()
            .uri("/drinks")
            .insert_header(("Authorization", bearer(&manager_token())))
            .insert_header(("Content-Type", "application/json"))
            .set_payload(payload)
            .to_request();
        assert_error(test::call_service(&app, req).await, 422, Some("unprocessable")).await;
    }
    Ok(())
}

#[actix_web::test]
async fn invalid_drink_fields_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;

    let long_title = "x".repeat(81);
    let cases = [
        json!({"title": "   ", "recipe": recipe(&[("water", "blue", 1)])}),
        json!({"title": long_title, "recipe": recipe(&[("water", "blue", 1)])}),
        json!({"title": "dry", "recipe": []}),
        json!({"title": "ghost", "recipe": recipe(&[("water", "blue", 0)])}),
        json!({"title": "nameless", "recipe": recipe(&[("", "blue", 1)])}),
    ];

    for body in cases {
        let req = test::TestRequest::post()
            .uri("/drinks")
            .insert_header(("Authorization", bearer(&manager_token())))
            .set_json(&body)
            .to_request();
        assert_error(test::call_service(&app, req).await, 422, Some("unprocessable")).await;
    }

    // Nothing was persisted
    let req = test::TestRequest::get().uri("/drinks").to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["drinks"], json!([]));
    Ok(())
}

#[actix_web::test]
async fn duplicate_title_is_conflict() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;

    create_drink(&app, "flat white", recipe(&[("coffee", "brown", 1)])).await;

    // Surrounding whitespace is trimmed before the uniqueness check
    let req = test::TestRequest::post()
        .uri("/drinks")
        .insert_header(("Authorization", bearer(&manager_token())))
        .set_json(json!({"title": "  flat white ", "recipe": recipe(&[("milk", "white", 1)])}))
        .to_request();
    assert_error(test::call_service(&app, req).await, 422, Some("title_conflict")).await;
    Ok(())
}

#[actix_web::test]
async fn patch_to_existing_title_is_conflict() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;

    create_drink(&app, "cortado", recipe(&[("coffee", "brown", 1)])).await;
    let other = create_drink(&app, "macchiato", recipe(&[("coffee", "brown", 1)])).await;
    let id = other["id"].as_i64().unwrap();

    let req = test::TestRequest::patch()
        .uri(&format!("/drinks/{id}"))
        .insert_header(("Authorization", bearer(&manager_token())))
        .set_json(json!({"title": "cortado"}))
        .to_request();
    assert_error(test::call_service(&app, req).await, 422, Some("title_conflict")).await;
    Ok(())
}

#[actix_web::test]
async fn patch_without_changes_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;

    let drink = create_drink(&app, "affogato", recipe(&[("gelato", "white", 1)])).await;
    let id = drink["id"].as_i64().unwrap();

    for body in [json!({}), json!({"title": null})] {
        let req = test::TestRequest::patch()
            .uri(&format!("/drinks/{id}"))
            .insert_header(("Authorization", bearer(&manager_token())))
            .set_json(&body)
            .to_request();
        assert_error(test::call_service(&app, req).await, 422, Some("unprocessable")).await;
    }
    Ok(())
}

#[actix_web::test]
async fn bad_drink_id_is_400() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;

    for id in ["abc", "0", "-3", "1.5"] {
        let req = test::TestRequest::delete()
            .uri(&format!("/drinks/{id}"))
            .insert_header(("Authorization", bearer(&manager_token())))
            .to_request();
        assert_error(test::call_service(&app, req).await, 400, Some("invalid_drink_id")).await;

        let req = test::TestRequest::patch()
            .uri(&format!("/drinks/{id}"))
            .insert_header(("Authorization", bearer(&manager_token())))
            .set_json(json!({"title": "whatever"}))
            .to_request();
        assert_error(test::call_service(&app, req).await, 400, Some("invalid_drink_id")).await;
    }
    Ok(())
}

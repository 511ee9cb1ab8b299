use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::tokens::bearer;
use backend_test_support::unique_helpers::unique_title;
use serde_json::json;

use crate::common::{assert_error, read_json};
use crate::support::drinks::{create_drink, manager_token, recipe};
use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn create_then_detail_round_trips_recipe_in_order() -> Result<(), Box<dyn std::error::Error>>
{
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;

    let title = unique_title("matcha");
    let ingredients = recipe(&[("matcha", "green", 1), ("milk", "white", 3), ("ice", "clear", 2)]);
    let created = create_drink(&app, &title, ingredients.clone()).await;
    assert_eq!(created["title"], title.as_str());
    assert_eq!(created["recipe"], ingredients);
    assert!(created["id"].as_i64().unwrap() > 0);

    let req = test::TestRequest::get()
        .uri("/drinks-detail")
        .insert_header(("Authorization", bearer(&manager_token())))
        .to_request();
    let body = read_json(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["drinks"], json!([created]));
    Ok(())
}

#[actix_web::test]
async fn public_list_redacts_parts() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;

    let first = create_drink(&app, "espresso", recipe(&[("coffee", "brown", 1)])).await;
    let second = create_drink(
        &app,
        "cappuccino",
        recipe(&[("coffee", "brown", 1), ("foam", "white", 2)]),
    )
    .await;

    let req = test::TestRequest::get().uri("/drinks").to_request();
    let body = read_json(test::call_service(&app, req).await, StatusCode::OK).await;

    assert_eq!(
        body,
        json!({
            "success": true,
            "drinks": [
                {"id": first["id"], "title": "espresso", "recipe": [{"name": "coffee", "color": "brown"}]},
                {"id": second["id"], "title": "cappuccino", "recipe": [
                    {"name": "coffee", "color": "brown"},
                    {"name": "foam", "color": "white"}
                ]}
            ]
        })
    );
    Ok(())
}

#[actix_web::test]
async fn patch_title_only_keeps_recipe() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;

    let ingredients = recipe(&[("water", "blue", 1)]);
    let drink = create_drink(&app, "water", ingredients.clone()).await;
    let id = drink["id"].as_i64().unwrap();

    let req = test::TestRequest::patch()
        .uri(&format!("/drinks/{id}"))
        .insert_header(("Authorization", bearer(&manager_token())))
        .set_json(json!({"title": "sparkling water"}))
        .to_request();
    let body = read_json(test::call_service(&app, req).await, StatusCode::OK).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["drinks"][0]["id"], id);
    assert_eq!(body["drinks"][0]["title"], "sparkling water");
    assert_eq!(body["drinks"][0]["recipe"], ingredients);
    Ok(())
}

#[actix_web::test]
async fn patch_recipe_only_keeps_title() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;

    let drink = create_drink(&app, "latte", recipe(&[("coffee", "brown", 1)])).await;
    let id = drink["id"].as_i64().unwrap();
    let new_recipe = recipe(&[("coffee", "brown", 1), ("milk", "white", 4)]);

    let req = test::TestRequest::patch()
        .uri(&format!("/drinks/{id}"))
        .insert_header(("Authorization", bearer(&manager_token())))
        .set_json(json!({"recipe": new_recipe}))
        .to_request();
    let body = read_json(test::call_service(&app, req).await, StatusCode::OK).await;

    assert_eq!(body["drinks"][0]["title"], "latte");
    assert_eq!(body["drinks"][0]["recipe"], new_recipe);
    Ok(())
}

#[actix_web::test]
async fn patch_null_recipe_resets_it() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;

    let drink = create_drink(&app, "americano", recipe(&[("coffee", "brown", 1)])).await;
    let id = drink["id"].as_i64().unwrap();

    let req = test::TestRequest::patch()
        .uri(&format!("/drinks/{id}"))
        .insert_header(("Authorization", bearer(&manager_token())))
        .set_json(json!({"recipe": null}))
        .to_request();
    let body = read_json(test::call_service(&app, req).await, StatusCode::OK).await;

    assert_eq!(body["drinks"][0]["title"], "americano");
    assert_eq!(body["drinks"][0]["recipe"], json!([]));
    Ok(())
}

#[actix_web::test]
async fn patch_unknown_drink_is_404() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::patch()
        .uri("/drinks/4242")
        .insert_header(("Authorization", bearer(&manager_token())))
        .set_json(json!({"title": "nobody"}))
        .to_request();
    assert_error(test::call_service(&app, req).await, 404, Some("drink_not_found")).await;
    Ok(())
}

#[actix_web::test]
async fn delete_removes_drink_from_list() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;

    let keep = create_drink(&app, "mocha", recipe(&[("cocoa", "brown", 1)])).await;
    let gone = create_drink(&app, "ristretto", recipe(&[("coffee", "black", 1)])).await;
    let gone_id = gone["id"].as_i64().unwrap();

    let req = test::TestRequest::delete()
        .uri(&format!("/drinks/{gone_id}"))
        .insert_header(("Authorization", bearer(&manager_token())))
        .to_request();
    let body = read_json(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body, json!({"success": true, "delete": gone_id}));

    let req = test::TestRequest::get().uri("/drinks").to_request();
    let body = read_json(test::call_service(&app, req).await, StatusCode::OK).await;
    let ids: Vec<i64> = body["drinks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![keep["id"].as_i64().unwrap()]);

    // Second delete of the same id
    let req = test::TestRequest::delete()
        .uri(&format!("/drinks/{gone_id}"))
        .insert_header(("Authorization", bearer(&manager_token())))
        .to_request();
    assert_error(test::call_service(&app, req).await, 404, Some("drink_not_found")).await;
    Ok(())
}

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, Error};
use backend_test_support::tokens::{bearer, TokenBuilder};
use serde_json::{json, Value};

/// A token carrying every drinks scope.
pub fn manager_token() -> String {
    TokenBuilder::new()
        .permissions(&[
            "get:drinks-detail",
            "post:drinks",
            "patch:drinks",
            "delete:drinks",
        ])
        .sign()
}

pub fn recipe(parts: &[(&str, &str, u32)]) -> Value {
    Value::Array(
        parts
            .iter()
            .map(|(name, color, parts)| json!({"name": name, "color": color, "parts": parts}))
            .collect(),
    )
}

/// Create a drink through the API and return its long form.
pub async fn create_drink<S>(app: &S, title: &str, recipe: Value) -> Value
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/drinks")
        .insert_header(("Authorization", bearer(&manager_token())))
        .set_json(json!({"title": title, "recipe": recipe}))
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(status, StatusCode::OK, "create failed: {body}");
    body["drinks"][0].clone()
}

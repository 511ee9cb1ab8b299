use std::sync::Arc;

use actix_web::test;
use async_trait::async_trait;
use backend_test_support::tokens::{bearer, TokenBuilder};
use drinks_backend::auth::jwks::JwksError;
use drinks_backend::auth::{JwkSet, KeySetSource};
use serde_json::json;

use crate::common::assert_error;
use crate::support::test_state::{test_auth_config, test_state_builder};
use crate::support::{build_auth_only_state, create_test_app};

async fn rejected_with(token: &str, code: &str) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_auth_only_state().await?)
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get()
        .uri("/drinks-detail")
        .insert_header(("Authorization", bearer(token)))
        .to_request();
    assert_error(test::call_service(&app, req).await, 401, Some(code)).await;
    Ok(())
}

fn detail_token() -> TokenBuilder {
    TokenBuilder::new().permissions(&["get:drinks-detail"])
}

#[actix_web::test]
async fn wrong_audience() -> Result<(), Box<dyn std::error::Error>> {
    let token = detail_token().claim("aud", json!("another-api")).sign();
    rejected_with(&token, "invalid_claims").await
}

#[actix_web::test]
async fn wrong_issuer() -> Result<(), Box<dyn std::error::Error>> {
    let token = detail_token()
        .claim("iss", json!("https://impostor.auth0.com/"))
        .sign();
    rejected_with(&token, "invalid_claims").await
}

#[actix_web::test]
async fn unknown_key_id() -> Result<(), Box<dyn std::error::Error>> {
    let token = detail_token().kid(Some("retired-key")).sign();
    rejected_with(&token, "invalid_header").await
}

#[actix_web::test]
async fn missing_key_id() -> Result<(), Box<dyn std::error::Error>> {
    let token = detail_token().kid(None).sign();
    rejected_with(&token, "invalid_header").await
}

#[actix_web::test]
async fn signature_from_unpublished_key() -> Result<(), Box<dyn std::error::Error>> {
    let token = detail_token().signed_with_unpublished_key().sign();
    rejected_with(&token, "invalid_header").await
}

#[actix_web::test]
async fn symmetric_signature() -> Result<(), Box<dyn std::error::Error>> {
    let token = detail_token().sign_hs256(b"not-the-identity-provider");
    rejected_with(&token, "invalid_header").await
}

#[actix_web::test]
async fn not_a_jwt() -> Result<(), Box<dyn std::error::Error>> {
    rejected_with("definitely-not-a-token", "invalid_header").await
}

struct UnreachableKeySet;

#[async_trait]
impl KeySetSource for UnreachableKeySet {
    async fn fetch(&self) -> Result<JwkSet, JwksError> {
        Err(JwksError::Status(502))
    }
}

#[actix_web::test]
async fn key_set_outage_is_503() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state_builder()
        .with_auth(test_auth_config())
        .with_key_source(Arc::new(UnreachableKeySet))
        .build()
        .await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/drinks-detail")
        .insert_header(("Authorization", bearer(&detail_token().sign())))
        .to_request();
    let body = assert_error(test::call_service(&app, req).await, 503, Some("jwks_unavailable")).await;

    // Upstream detail stays in the logs
    assert!(!body.message.contains("502"));
    Ok(())
}

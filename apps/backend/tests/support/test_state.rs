use std::sync::Arc;

use backend_test_support::tokens::{test_jwks, TEST_AUDIENCE, TEST_DOMAIN};
use drinks_backend::auth::{JwkSet, KeySetSource, StaticKeySetSource};
use drinks_backend::config::{AuthConfig, DbKind};
use drinks_backend::infra::state::{build_state, StateBuilder};
use drinks_backend::state::app_state::AppState;
use drinks_backend::AppError;

pub fn test_auth_config() -> AuthConfig {
    AuthConfig::new(TEST_DOMAIN, TEST_AUDIENCE)
}

/// The published test key set, served without any network.
pub fn test_key_source() -> Arc<dyn KeySetSource> {
    let set: JwkSet = serde_json::from_value(test_jwks()).expect("test JWKS parses");
    Arc::new(StaticKeySetSource::new(set))
}

pub fn test_state_builder() -> StateBuilder {
    build_state()
        .with_auth(test_auth_config())
        .with_key_source(test_key_source())
}

/// Fresh in-memory database plus the test verifier. Every call gets its own
/// database, so tests do not see each other's drinks.
pub async fn build_test_state() -> Result<AppState, AppError> {
    test_state_builder().with_db(DbKind::SqliteMemory).build().await
}

pub async fn build_auth_only_state() -> Result<AppState, AppError> {
    test_state_builder().build().await
}

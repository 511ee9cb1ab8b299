use std::sync::Arc;

use crate::auth::{KeySetSource, TokenVerifier};
use crate::config::{AuthConfig, DbKind};
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;

/// Builder for `AppState`, shared by `main` and tests.
#[derive(Default)]
pub struct StateBuilder {
    auth: Option<AuthConfig>,
    key_source: Option<Arc<dyn KeySetSource>>,
    db_kind: Option<DbKind>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_db(mut self, kind: DbKind) -> Self {
        self.db_kind = Some(kind);
        self
    }

    pub fn with_auth(mut self, config: AuthConfig) -> Self {
        self.auth = Some(config);
        self
    }

    /// Serve signing keys from `source` instead of the configured JWKS URL.
    pub fn with_key_source(mut self, source: Arc<dyn KeySetSource>) -> Self {
        self.key_source = Some(source);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let config = self
            .auth
            .ok_or_else(|| AppError::config("auth configuration is required"))?;

        let verifier = match self.key_source {
            Some(source) => TokenVerifier::new(config, source),
            None => TokenVerifier::from_config(config)?,
        };
        let verifier = Arc::new(verifier);

        match self.db_kind {
            Some(kind) => {
                // single entrypoint: connect + migrate
                let conn = bootstrap_db(kind).await?;
                Ok(AppState::new(conn, verifier))
            }
            None => Ok(AppState::new_without_db(verifier)),
        }
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}

use std::fmt;
use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::auth::TokenVerifier;

/// Shared resources, fixed at startup and injected through `web::Data`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection (absent in auth-only test setups)
    pub db: Option<DatabaseConnection>,
    /// Bearer token verification, including the signing-key cache
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, verifier: Arc<TokenVerifier>) -> Self {
        Self {
            db: Some(db),
            verifier,
        }
    }

    pub fn new_without_db(verifier: Arc<TokenVerifier>) -> Self {
        Self { db: None, verifier }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    pub fn verifier(&self) -> &TokenVerifier {
        &self.verifier
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("db", &self.db.is_some())
            .field("audience", &self.verifier.config().audience)
            .finish()
    }
}

//! Decoded access-token claims.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `aud` may be a single string or a list (Auth0 issues both shapes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    One(String),
    Many(Vec<String>),
}

impl Audience {
    pub fn contains(&self, audience: &str) -> bool {
        match self {
            Audience::One(a) => a == audience,
            Audience::Many(all) => all.iter().any(|a| a == audience),
        }
    }
}

/// Claims of a signature-verified token, inserted into request extensions by
/// the authorization middleware. Only produced by `TokenVerifier::verify`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthClaims {
    #[serde(default)]
    pub sub: Option<String>,
    pub aud: Audience,
    pub iss: String,
    /// Expiry (seconds since epoch)
    pub exp: u64,
    /// `None` when the token carries no `permissions` claim at all.
    #[serde(default)]
    pub permissions: Option<BTreeSet<String>>,
    /// Every other claim, kept as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AuthClaims {
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions
            .as_ref()
            .is_some_and(|granted| granted.contains(permission))
    }
}

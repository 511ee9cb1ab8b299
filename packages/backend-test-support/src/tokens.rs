//! Minting access tokens the way the identity provider would.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Map, Value};

use crate::jwt_keys::{OTHER_PRIVATE_PEM, PRIMARY_N, PRIMARY_PRIVATE_PEM, RSA_E};

pub const TEST_KID: &str = "test-signing-key";
pub const TEST_DOMAIN: &str = "drinks-test.eu.auth0.com";
pub const TEST_AUDIENCE: &str = "drinks";

pub fn test_issuer() -> String {
    format!("https://{TEST_DOMAIN}/")
}

/// The published key set: the primary key under `TEST_KID`.
pub fn test_jwks() -> Value {
    json!({
        "keys": [{
            "kty": "RSA",
            "kid": TEST_KID,
            "use": "sig",
            "alg": "RS256",
            "n": PRIMARY_N,
            "e": RSA_E,
        }]
    })
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_secs()
}

/// Builds a signed token. Defaults produce a token the test verifier accepts
/// with no permissions granted.
#[derive(Debug, Clone)]
pub struct TokenBuilder {
    kid: Option<String>,
    key_pem: &'static str,
    claims: Map<String, Value>,
}

impl Default for TokenBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenBuilder {
    pub fn new() -> Self {
        let now = now();
        let mut claims = Map::new();
        claims.insert("iss".into(), json!(test_issuer()));
        claims.insert("aud".into(), json!(TEST_AUDIENCE));
        claims.insert("sub".into(), json!("auth0|barista"));
        claims.insert("iat".into(), json!(now));
        claims.insert("exp".into(), json!(now + 3600));
        claims.insert("permissions".into(), json!([]));
        Self {
            kid: Some(TEST_KID.to_string()),
            key_pem: PRIMARY_PRIVATE_PEM,
            claims,
        }
    }

    pub fn permissions(mut self, permissions: &[&str]) -> Self {
        self.claims
            .insert("permissions".into(), json!(permissions));
        self
    }

    pub fn claim(mut self, name: &str, value: Value) -> Self {
        self.claims.insert(name.into(), value);
        self
    }

    pub fn without_claim(mut self, name: &str) -> Self {
        self.claims.remove(name);
        self
    }

    /// Expired well beyond the verifier's clock leeway.
    pub fn expired(self) -> Self {
        let past = now() - 3600;
        self.claim("iat", json!(past - 3600)).claim("exp", json!(past))
    }

    pub fn kid(mut self, kid: Option<&str>) -> Self {
        self.kid = kid.map(str::to_string);
        self
    }

    /// Sign with a key that is not in the published set, under the
    /// published kid.
    pub fn signed_with_unpublished_key(mut self) -> Self {
        self.key_pem = OTHER_PRIVATE_PEM;
        self
    }

    pub fn sign(self) -> String {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.kid;
        let key = EncodingKey::from_rsa_pem(self.key_pem.as_bytes()).expect("test RSA key");
        encode(&header, &self.claims, &key).expect("sign test token")
    }

    /// Sign with a shared secret instead of the RSA key.
    pub fn sign_hs256(self, secret: &[u8]) -> String {
        let mut header = Header::new(Algorithm::HS256);
        header.kid = self.kid;
        encode(&header, &self.claims, &EncodingKey::from_secret(secret)).expect("sign test token")
    }
}

/// `Authorization` header value for a token.
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

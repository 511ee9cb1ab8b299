//! Bearer token verification against the identity provider's key set.

use std::sync::Arc;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, Validation};

use super::claims::AuthClaims;
use super::jwks::{HttpKeySetSource, JwksResolver, KeySetSource};
use super::AuthError;
use crate::config::AuthConfig;
use crate::error::AppError;

const REQUIRED_CLAIMS: [&str; 3] = ["exp", "aud", "iss"];

/// Verifies RS-signed access tokens: header, key id, signature, expiry,
/// audience and issuer.
pub struct TokenVerifier {
    config: AuthConfig,
    resolver: JwksResolver,
}

impl TokenVerifier {
    pub fn new(config: AuthConfig, source: Arc<dyn KeySetSource>) -> Self {
        let resolver = JwksResolver::new(source, config.jwks_cache_ttl);
        Self { config, resolver }
    }

    /// Verifier backed by the configured JWKS URL.
    pub fn from_config(config: AuthConfig) -> Result<Self, AppError> {
        let source = HttpKeySetSource::new(config.jwks_url.clone())?;
        Ok(Self::new(config, Arc::new(source)))
    }

    pub fn with_resolver(config: AuthConfig, resolver: JwksResolver) -> Self {
        Self { config, resolver }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub async fn verify(&self, token: &str) -> Result<AuthClaims, AppError> {
        let header = decode_header(token)
            .map_err(|_| AuthError::invalid_header("Authorization malformed."))?;

        let kid = header
            .kid
            .ok_or_else(|| AuthError::invalid_header("Authorization malformed."))?;

        // Reject before any key lookup so a forged header never costs a fetch
        if !self.config.algorithms.contains(&header.alg) {
            return Err(AuthError::invalid_header(format!(
                "Unsupported signing algorithm {:?}.",
                header.alg
            ))
            .into());
        }

        let key = self.resolver.resolve(&kid).await?;
        let decoding_key = key
            .decoding_key()
            .map_err(|_| AuthError::invalid_header("Unable to find the appropriate key."))?;

        let mut validation = Validation::new(header.alg);
        validation.algorithms = self.config.algorithms.clone();
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[self.config.issuer()]);
        validation.set_required_spec_claims(&REQUIRED_CLAIMS);

        decode::<AuthClaims>(token, &decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| classify(e).into())
    }
}

fn classify(e: jsonwebtoken::errors::Error) -> AuthError {
    match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::expired_token(),
        ErrorKind::InvalidAudience
        | ErrorKind::InvalidIssuer
        | ErrorKind::ImmatureSignature
        | ErrorKind::MissingRequiredClaim(_) => AuthError::invalid_claims(
            "Incorrect claims. Please, check the audience and issuer.",
        ),
        _ => AuthError::invalid_header("Unable to parse authentication token."),
    }
}

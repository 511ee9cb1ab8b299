//! Identity-provider settings for bearer token verification.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use jsonwebtoken::Algorithm;

use super::db::must_var;
use crate::error::AppError;

const DEFAULT_JWKS_CACHE_TTL: Duration = Duration::from_secs(600);

/// Configuration for verifying externally issued access tokens.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Identity-provider domain, e.g. `example.auth0.com`
    pub domain: String,
    /// Expected `aud` claim
    pub audience: String,
    /// Accepted signing algorithms; asymmetric RSA only
    pub algorithms: Vec<Algorithm>,
    /// Where the key set is published
    pub jwks_url: String,
    /// How long fetched keys stay cached
    pub jwks_cache_ttl: Duration,
}

impl AuthConfig {
    pub fn new(domain: impl Into<String>, audience: impl Into<String>) -> Self {
        let domain = domain.into();
        Self {
            jwks_url: format!("https://{domain}/.well-known/jwks.json"),
            domain,
            audience: audience.into(),
            algorithms: vec![Algorithm::RS256],
            jwks_cache_ttl: DEFAULT_JWKS_CACHE_TTL,
        }
    }

    pub fn with_jwks_url(mut self, url: impl Into<String>) -> Self {
        self.jwks_url = url.into();
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.jwks_cache_ttl = ttl;
        self
    }

    pub fn with_algorithms(mut self, algorithms: Vec<Algorithm>) -> Result<Self, AppError> {
        if algorithms.is_empty() {
            return Err(AppError::config("at least one signing algorithm is required"));
        }
        if let Some(bad) = algorithms.iter().find(|alg| !is_rsa(**alg)) {
            return Err(AppError::config(format!(
                "unsupported signing algorithm {bad:?}: only RS256, RS384 and RS512 are accepted"
            )));
        }
        self.algorithms = algorithms;
        Ok(self)
    }

    /// The `iss` value tokens must carry: `https://{domain}/`.
    pub fn issuer(&self) -> String {
        format!("https://{}/", self.domain)
    }

    /// Read configuration from the environment.
    ///
    /// Required: `AUTH0_DOMAIN`, `API_AUDIENCE`.
    /// Optional: `AUTH_ALGORITHMS` (comma-separated, default `RS256`),
    /// `JWKS_URL`, `JWKS_CACHE_TTL_SECS`.
    pub fn from_env() -> Result<Self, AppError> {
        let mut config = Self::new(must_var("AUTH0_DOMAIN")?, must_var("API_AUDIENCE")?);

        if let Ok(raw) = env::var("AUTH_ALGORITHMS") {
            config = config.with_algorithms(parse_algorithms(&raw)?)?;
        }
        if let Ok(url) = env::var("JWKS_URL") {
            config = config.with_jwks_url(url);
        }
        if let Ok(raw) = env::var("JWKS_CACHE_TTL_SECS") {
            let secs = raw.parse::<u64>().map_err(|_| {
                AppError::config(format!("JWKS_CACHE_TTL_SECS must be a number, got '{raw}'"))
            })?;
            config = config.with_cache_ttl(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

fn is_rsa(alg: Algorithm) -> bool {
    matches!(alg, Algorithm::RS256 | Algorithm::RS384 | Algorithm::RS512)
}

fn parse_algorithms(raw: &str) -> Result<Vec<Algorithm>, AppError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            Algorithm::from_str(s)
                .map_err(|_| AppError::config(format!("unknown signing algorithm '{s}'")))
        })
        .collect()
}

//! Identity-provider signing keys: fetching, caching and lookup by key id.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::DecodingKey;
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::AuthError;
use crate::error::AppError;

const FETCH_ATTEMPTS: u32 = 2;
const RETRY_DELAY: Duration = Duration::from_millis(200);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(10);

/// One entry of a published key set. Fields other than `kty` are optional
/// because non-RSA keys carry different parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
    pub kty: String,
    #[serde(default)]
    pub kid: Option<String>,
    #[serde(rename = "use", default)]
    pub key_use: Option<String>,
    #[serde(default)]
    pub alg: Option<String>,
    #[serde(default)]
    pub n: Option<String>,
    #[serde(default)]
    pub e: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwkSet {
    pub keys: Vec<Jwk>,
}

/// RSA public key parameters selected for a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    pub kty: String,
    pub kid: String,
    pub key_use: Option<String>,
    /// Base64url modulus
    pub n: String,
    /// Base64url exponent
    pub e: String,
}

impl RsaPublicKey {
    /// Usable signing keys only: RSA, with a kid, modulus and exponent, and
    /// no `use` other than `sig`.
    pub fn from_jwk(jwk: &Jwk) -> Option<Self> {
        if !jwk.kty.eq_ignore_ascii_case("RSA") {
            return None;
        }
        if jwk.key_use.as_deref().is_some_and(|u| u != "sig") {
            return None;
        }
        Some(Self {
            kty: jwk.kty.clone(),
            kid: jwk.kid.clone()?,
            key_use: jwk.key_use.clone(),
            n: jwk.n.clone()?,
            e: jwk.e.clone()?,
        })
    }

    pub fn decoding_key(&self) -> Result<DecodingKey, jsonwebtoken::errors::Error> {
        DecodingKey::from_rsa_components(&self.n, &self.e)
    }
}

#[derive(Debug, Error)]
pub enum JwksError {
    #[error("key set request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("key set endpoint returned HTTP {0}")]
    Status(u16),
    #[error("no signing key matches kid '{0}'")]
    UnknownKey(String),
    /// Unknown kid seen before the refresh interval elapsed.
    #[error("kid '{0}' not cached and key set was refreshed too recently")]
    RefreshThrottled(String),
}

impl JwksError {
    /// Worth one more attempt: connection trouble, timeouts, 5xx.
    fn is_transient(&self) -> bool {
        match self {
            JwksError::Transport(e) => !e.is_decode(),
            JwksError::Status(status) => *status >= 500,
            JwksError::UnknownKey(_) | JwksError::RefreshThrottled(_) => false,
        }
    }
}

impl From<JwksError> for AppError {
    fn from(e: JwksError) -> Self {
        match e {
            JwksError::UnknownKey(_) => {
                AppError::Auth(AuthError::invalid_header("Appropriate key was not found"))
            }
            other => AppError::key_set_unavailable(other.to_string()),
        }
    }
}

/// Where the key set comes from.
#[async_trait]
pub trait KeySetSource: Send + Sync {
    async fn fetch(&self) -> Result<JwkSet, JwksError>;
}

/// Fetches the key set over HTTPS, retrying once on transient failure.
pub struct HttpKeySetSource {
    client: reqwest::Client,
    url: String,
}

impl HttpKeySetSource {
    pub fn new(url: impl Into<String>) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    async fn fetch_once(&self) -> Result<JwkSet, JwksError> {
        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(JwksError::Status(status.as_u16()));
        }

        Ok(response.json::<JwkSet>().await?)
    }
}

#[async_trait]
impl KeySetSource for HttpKeySetSource {
    async fn fetch(&self) -> Result<JwkSet, JwksError> {
        let mut attempt = 1;
        loop {
            match self.fetch_once().await {
                Ok(set) => {
                    if attempt > 1 {
                        info!(url = %self.url, attempt, "jwks.fetch_retry=success");
                    }
                    return Ok(set);
                }
                Err(e) if attempt < FETCH_ATTEMPTS && e.is_transient() => {
                    warn!(url = %self.url, attempt, error = %e, "jwks.fetch_retry=failed");
                    tokio::time::sleep(RETRY_DELAY).await;
                    attempt += 1;
                }
                Err(e) => {
                    warn!(url = %self.url, attempt, error = %e, "jwks.fetch=failed");
                    return Err(e);
                }
            }
        }
    }
}

/// A fixed key set, for offline deployments and tests.
pub struct StaticKeySetSource {
    set: JwkSet,
}

impl StaticKeySetSource {
    pub fn new(set: JwkSet) -> Self {
        Self { set }
    }
}

#[async_trait]
impl KeySetSource for StaticKeySetSource {
    async fn fetch(&self) -> Result<JwkSet, JwksError> {
        Ok(self.set.clone())
    }
}

/// Resolves a token's key id to an RSA key.
///
/// Keys live in a TTL cache keyed by kid. A miss refreshes the whole set
/// once; refreshes are serialized and at most one runs per
/// `min_refresh_interval`. A kid that is still unknown after a refresh is
/// rejected as a bad token. A miss that lands inside the interval is
/// reported as [`JwksError::RefreshThrottled`] (503), so a key rotated just
/// after the last refresh is retried by the client rather than refused.
pub struct JwksResolver {
    source: Arc<dyn KeySetSource>,
    cache: Cache<String, RsaPublicKey>,
    last_refresh: Mutex<Option<Instant>>,
    min_refresh_interval: Duration,
}

impl JwksResolver {
    pub fn new(source: Arc<dyn KeySetSource>, ttl: Duration) -> Self {
        Self {
            source,
            cache: Cache::builder().max_capacity(64).time_to_live(ttl).build(),
            last_refresh: Mutex::new(None),
            min_refresh_interval: DEFAULT_MIN_REFRESH_INTERVAL,
        }
    }

    pub fn with_min_refresh_interval(mut self, interval: Duration) -> Self {
        self.min_refresh_interval = interval;
        self
    }

    pub async fn resolve(&self, kid: &str) -> Result<RsaPublicKey, JwksError> {
        if let Some(key) = self.cache.get(kid).await {
            return Ok(key);
        }

        let mut last_refresh = self.last_refresh.lock().await;

        // Another request may have refreshed while we waited for the lock
        if let Some(key) = self.cache.get(kid).await {
            return Ok(key);
        }

        let recently_refreshed = last_refresh
            .is_some_and(|at| at.elapsed() < self.min_refresh_interval);
        if recently_refreshed {
            debug!(kid, "jwks.refresh_skipped");
            return Err(JwksError::RefreshThrottled(kid.to_string()));
        }

        self.refresh().await?;
        *last_refresh = Some(Instant::now());

        self.cache
            .get(kid)
            .await
            .ok_or_else(|| JwksError::UnknownKey(kid.to_string()))
    }

    async fn refresh(&self) -> Result<(), JwksError> {
        let set = self.source.fetch().await?;

        self.cache.invalidate_all();
        let mut usable = 0usize;
        for key in set.keys.iter().filter_map(RsaPublicKey::from_jwk) {
            self.cache.insert(key.kid.clone(), key).await;
            usable += 1;
        }

        debug!(total = set.keys.len(), usable, "jwks.refreshed");
        Ok(())
    }
}

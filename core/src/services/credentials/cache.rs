//! TTL cache in front of a credential source.

use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, error, warn};

use crate::domain::value_objects::DBCredentials;
use crate::errors::CredentialError;

use super::config::CredentialCacheConfig;
use super::source::CredentialSource;

/// Roughly 30 years, the same horizon tokio uses for "never"
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// `now + duration`, saturating at a far-future instant
fn instant_after(now: Instant, duration: Duration) -> Instant {
    now.checked_add(duration)
        .or_else(|| now.checked_add(FAR_FUTURE))
        .unwrap_or(now)
}

struct CachedCredentials {
    credentials: DBCredentials,
    expires_at: Instant,
}

impl CachedCredentials {
    fn is_fresh(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Concurrency-safe cache of database credentials
///
/// Holds at most one entry. Readers share a read lock; a refresh takes the
/// write lock, so concurrent callers that find the entry stale wait for a
/// single fetch instead of each calling the source. Every read returns an
/// owned copy.
///
/// Construct once at startup and share it behind an `Arc`.
pub struct CredentialCache<S: CredentialSource> {
    source: S,
    config: CredentialCacheConfig,
    entry: RwLock<Option<CachedCredentials>>,
}

impl<S: CredentialSource> CredentialCache<S> {
    /// Creates an empty cache over a source
    ///
    /// # Arguments
    ///
    /// * `source` - The secret store client
    /// * `config` - TTL and default fetch timeout
    pub fn new(source: S, config: CredentialCacheConfig) -> Self {
        Self {
            source,
            config,
            entry: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &CredentialCacheConfig {
        &self.config
    }

    /// Get credentials, bounded by the configured fetch timeout
    ///
    /// # Returns
    ///
    /// * `Ok(DBCredentials)` - Cached or freshly fetched credentials
    /// * `Err(CredentialError)` - Both attempts failed or the timeout elapsed
    pub async fn get_credentials(&self) -> Result<DBCredentials, CredentialError> {
        self.get_credentials_until(instant_after(Instant::now(), self.config.fetch_timeout))
            .await
    }

    /// Get credentials, giving up at `deadline`
    ///
    /// The deadline covers the wait for the lock, the fetch and the retry.
    ///
    /// # Returns
    ///
    /// * `Err(CredentialError::DeadlineExceeded)` - The deadline passed first
    pub async fn get_credentials_until(
        &self,
        deadline: Instant,
    ) -> Result<DBCredentials, CredentialError> {
        match timeout_at(deadline, self.load()).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Credential fetch deadline exceeded");
                Err(CredentialError::DeadlineExceeded)
            }
        }
    }

    /// Drop the cached entry so the next call goes to the source
    pub async fn invalidate(&self) {
        *self.entry.write().await = None;
    }

    async fn load(&self) -> Result<DBCredentials, CredentialError> {
        if self.config.ttl.is_zero() {
            return self.fetch_with_retry().await;
        }

        {
            let entry = self.entry.read().await;
            if let Some(cached) = entry.as_ref().filter(|c| c.is_fresh(Instant::now())) {
                return Ok(cached.credentials.clone());
            }
        }

        let mut entry = self.entry.write().await;

        // Another caller may have refreshed while we waited for the lock
        let now = Instant::now();
        if let Some(cached) = entry.as_ref().filter(|c| c.is_fresh(now)) {
            return Ok(cached.credentials.clone());
        }

        *entry = None;
        let credentials = self.fetch_with_retry().await?;

        *entry = Some(CachedCredentials {
            credentials: credentials.clone(),
            expires_at: instant_after(Instant::now(), self.config.ttl),
        });
        debug!(ttl_secs = self.config.ttl.as_secs(), "Credential cache refreshed");

        Ok(credentials)
    }

    async fn fetch_with_retry(&self) -> Result<DBCredentials, CredentialError> {
        match self.source.fetch_credentials().await {
            Ok(credentials) => Ok(credentials),
            Err(first) => {
                warn!(error = %first, "Credential fetch failed, retrying once");
                self.source.fetch_credentials().await.map_err(|e| {
                    error!(error = %e, "Credential fetch failed after retry");
                    e
                })
            }
        }
    }
}

//! Configuration for the credential cache

use std::time::Duration;

use cfx_shared::config::SecretsConfig;

/// Configuration for the credential cache
#[derive(Debug, Clone)]
pub struct CredentialCacheConfig {
    /// How long fetched credentials are served from memory; zero disables caching
    pub ttl: Duration,
    /// Default bound on a whole fetch, retry included
    pub fetch_timeout: Duration,
}

impl Default for CredentialCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            fetch_timeout: Duration::from_secs(10),
        }
    }
}

impl From<&SecretsConfig> for CredentialCacheConfig {
    fn from(secrets: &SecretsConfig) -> Self {
        Self {
            ttl: Duration::from_secs(secrets.cache_ttl_seconds),
            fetch_timeout: Duration::from_secs(secrets.fetch_timeout_seconds),
        }
    }
}

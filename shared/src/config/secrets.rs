//! Secret store and credential cache configuration

use serde::{Deserialize, Serialize};

const LOCALSTACK_ENDPOINT: &str = "http://host.docker.internal:4566";

/// Longest accepted credential cache TTL (1 day)
pub const MAX_CACHE_TTL_SECONDS: u64 = 86_400;

/// Longest accepted credential fetch timeout (5 minutes)
pub const MAX_FETCH_TIMEOUT_SECONDS: u64 = 300;

/// Where database credentials are fetched from and how long they are cached
#[derive(Clone, Deserialize, Serialize)]
pub struct SecretsConfig {
    /// Name or ARN of the secret holding the database credentials
    pub secret_name: String,

    /// AWS region of the secret store
    pub region: String,

    /// Endpoint override (LocalStack); `None` for real AWS
    #[serde(default)]
    pub endpoint_url: Option<String>,

    /// Static access key, used together with an endpoint override
    #[serde(default)]
    pub access_key_id: Option<String>,

    /// Static secret key, used together with an endpoint override
    #[serde(default)]
    pub secret_access_key: Option<String>,

    /// Credential cache TTL in seconds; 0 disables caching
    pub cache_ttl_seconds: u64,

    /// Upper bound for a single credential fetch, retry included
    pub fetch_timeout_seconds: u64,
}

impl Default for SecretsConfig {
    fn default() -> Self {
        Self {
            secret_name: String::new(),
            region: String::from("us-east-1"),
            endpoint_url: None,
            access_key_id: None,
            secret_access_key: None,
            cache_ttl_seconds: 300,
            fetch_timeout_seconds: 10,
        }
    }
}

impl SecretsConfig {
    /// Default endpoint for the given `APP_ENV`
    ///
    /// Local development against LocalStack needs no explicit endpoint.
    pub fn default_endpoint_for(app_env: Option<&str>) -> Option<String> {
        match app_env {
            Some("localstack") => Some(LOCALSTACK_ENDPOINT.to_string()),
            _ => None,
        }
    }

    /// Whether static keys should replace the default AWS credential chain
    pub fn uses_static_keys(&self) -> bool {
        self.endpoint_url.is_some() && self.access_key_id.is_some()
    }
}

impl std::fmt::Debug for SecretsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretsConfig")
            .field("secret_name", &self.secret_name)
            .field("region", &self.region)
            .field("endpoint_url", &self.endpoint_url)
            .field("access_key_id", &self.access_key_id.as_ref().map(|_| "***"))
            .field("secret_access_key", &self.secret_access_key.as_ref().map(|_| "***"))
            .field("cache_ttl_seconds", &self.cache_ttl_seconds)
            .field("fetch_timeout_seconds", &self.fetch_timeout_seconds)
            .finish()
    }
}

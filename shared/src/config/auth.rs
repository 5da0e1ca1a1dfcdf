//! Authentication configuration

use serde::{Deserialize, Serialize};

const DEFAULT_SECRET: &str = "development-secret-please-change-in-production";

/// Longest accepted access token lifetime (1 day)
pub const MAX_ACCESS_TOKEN_EXPIRY_SECONDS: i64 = 86_400;

/// Longest accepted refresh token lifetime (365 days)
pub const MAX_REFRESH_TOKEN_EXPIRY_SECONDS: i64 = 365 * 86_400;

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Symmetric secret used to sign access tokens (HS256)
    pub secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            access_token_expiry: 900,     // 15 minutes
            refresh_token_expiry: 604800, // 7 days
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes.saturating_mul(60);
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days.saturating_mul(86_400);
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Reject login and refresh for accounts whose email is not verified
    #[serde(default = "default_require_verified_email")]
    pub require_verified_email: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            require_verified_email: default_require_verified_email(),
        }
    }
}

fn default_require_verified_email() -> bool {
    true
}

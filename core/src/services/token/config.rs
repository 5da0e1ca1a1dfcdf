//! Configuration for the token service

use chrono::Duration;

use cfx_shared::config::auth::{MAX_ACCESS_TOKEN_EXPIRY_SECONDS, MAX_REFRESH_TOKEN_EXPIRY_SECONDS};
use cfx_shared::config::JwtConfig;

use crate::domain::entities::token::{ACCESS_TOKEN_EXPIRY_MINUTES, REFRESH_TOKEN_EXPIRY_DAYS};

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// HS256 signing secret
    pub jwt_secret: String,
    /// Access token lifetime
    pub access_token_ttl: Duration,
    /// Refresh token lifetime
    pub refresh_token_ttl: Duration,
}

impl TokenServiceConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            ..Self::default()
        }
    }
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            access_token_ttl: Duration::minutes(ACCESS_TOKEN_EXPIRY_MINUTES),
            refresh_token_ttl: Duration::days(REFRESH_TOKEN_EXPIRY_DAYS),
        }
    }
}

/// Lifetime in seconds, clamped to `1..=max`
fn bounded_lifetime(seconds: i64, max: i64, fallback: Duration) -> Duration {
    Duration::try_seconds(seconds.clamp(1, max)).unwrap_or(fallback)
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(jwt: &JwtConfig) -> Self {
        let defaults = Self::default();
        Self {
            jwt_secret: jwt.secret.clone(),
            access_token_ttl: bounded_lifetime(
                jwt.access_token_expiry,
                MAX_ACCESS_TOKEN_EXPIRY_SECONDS,
                defaults.access_token_ttl,
            ),
            refresh_token_ttl: bounded_lifetime(
                jwt.refresh_token_expiry,
                MAX_REFRESH_TOKEN_EXPIRY_SECONDS,
                defaults.refresh_token_ttl,
            ),
        }
    }
}


//! Configuration for the authentication service

use chrono::Duration;

use cfx_shared::config::AuthConfig;

use crate::domain::entities::token::VERIFICATION_TOKEN_EXPIRY_HOURS;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Refuse login and refresh until the email is verified
    pub require_verified_email: bool,
    /// Lifetime of an email verification token
    pub verification_token_ttl: Duration,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            require_verified_email: true,
            verification_token_ttl: Duration::hours(VERIFICATION_TOKEN_EXPIRY_HOURS),
        }
    }
}

impl From<&AuthConfig> for AuthServiceConfig {
    fn from(auth: &AuthConfig) -> Self {
        Self {
            require_verified_email: auth.require_verified_email,
            ..Self::default()
        }
    }
}

//! Capability trait for stateless access token checks.

use uuid::Uuid;

use crate::errors::DomainError;

/// Identity carried by a valid access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
}

/// Validates access tokens without touching storage
///
/// Request-authentication layers depend on this trait rather than on a
/// concrete service.
pub trait TokenValidator: Send + Sync {
    /// Verify signature, algorithm and expiry of an access token
    ///
    /// # Returns
    ///
    /// * `Ok(AuthenticatedUser)` - The token is valid
    /// * `Err(DomainError::Token(TokenError::InvalidToken))` - Any failure
    fn validate_access_token(&self, token: &str) -> Result<AuthenticatedUser, DomainError>;
}

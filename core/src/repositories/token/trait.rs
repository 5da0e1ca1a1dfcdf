//! Token repository trait defining the interface for refresh token persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

/// Repository trait for refresh token persistence
///
/// Only token hashes reach this layer. Implementations must enforce hash
/// uniqueness across all rows, soft-deleted ones included, and make
/// `revoke_by_id` a conditional single-row update so that two concurrent
/// rotations of the same token cannot both succeed.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Save a new refresh token
    ///
    /// # Arguments
    /// * `token` - The RefreshToken record to persist
    ///
    /// # Returns
    /// * `Ok(RefreshToken)` - The saved record
    /// * `Err(DomainError::Conflict)` - A token with the same hash already exists
    /// * `Err(DomainError::Storage)` - Persistence failed
    ///
    /// # Example
    /// ```no_run
    /// # use chrono::Duration;
    /// # use uuid::Uuid;
    /// # use cfx_core::repositories::TokenRepository;
    /// # use cfx_core::domain::entities::token::RefreshToken;
    /// # async fn example(repo: &impl TokenRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// let token = RefreshToken::new(Uuid::new_v4(), "sha256_hex".to_string(), Duration::days(7));
    /// let saved = repo.save_refresh_token(token).await?;
    /// println!("Token saved with ID: {}", saved.id);
    /// # Ok(())
    /// # }
    /// ```
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError>;

    /// Find a refresh token by its hash
    ///
    /// Revoked and expired records are returned too; callers decide usability.
    ///
    /// # Returns
    /// * `Ok(Some(RefreshToken))` - Token found
    /// * `Ok(None)` - No live record with the given hash
    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError>;

    /// Revoke one token by ID
    ///
    /// Sets `revoked_at` only if it is still null.
    ///
    /// # Returns
    /// * `Ok(())` - The token was revoked by this call
    /// * `Err(DomainError::NotFound)` - No matching unrevoked token
    async fn revoke_by_id(&self, id: Uuid) -> Result<(), DomainError>;

    /// Revoke all unrevoked tokens of a user
    ///
    /// # Returns
    /// * `Ok(u64)` - Number of tokens revoked, zero included
    ///
    /// # Example
    /// ```no_run
    /// # use uuid::Uuid;
    /// # use cfx_core::repositories::TokenRepository;
    /// # async fn example(repo: &impl TokenRepository, user_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
    /// let revoked = repo.revoke_all_for_user(user_id).await?;
    /// println!("Revoked {} tokens", revoked);
    /// # Ok(())
    /// # }
    /// ```
    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<u64, DomainError>;

    /// Delete tokens past their expiry
    ///
    /// # Returns
    /// * `Ok(u64)` - Number of tokens deleted
    async fn delete_expired_tokens(&self) -> Result<u64, DomainError>;
}

//! User repository trait defining the interface for user data persistence.
//!
//! Emails reaching this layer are already normalized. Lookups skip
//! soft-deleted users, while uniqueness checks include them so an email is
//! never recycled.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a live user by their unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No live user with the given ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a live user by normalized email
    ///
    /// # Example
    /// ```no_run
    /// # use cfx_core::repositories::UserRepository;
    /// # async fn example(repo: &impl UserRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// match repo.find_by_email("alice@example.com").await? {
    ///     Some(user) => println!("User found: {:?}", user.id),
    ///     None => println!("User not found"),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Check whether any user, soft-deleted ones included, owns the email
    ///
    /// # Arguments
    /// * `email` - Normalized email
    /// * `exclude_id` - A user to ignore, used when updating that user
    async fn exists_by_email(
        &self,
        email: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, DomainError>;

    /// Find the live user holding a pending verification token
    async fn find_by_verification_token(&self, token: &str) -> Result<Option<User>, DomainError>;

    /// Mark the holder of a pending verification token as verified
    ///
    /// A single conditional write: sets `email_verified_at = now` and clears
    /// the token and its expiry, but only while the token is still stored and
    /// `now` is not past its expiry. Of several concurrent calls with the same
    /// token at most one returns `true`.
    ///
    /// # Returns
    /// * `Ok(true)` - This call consumed the token
    /// * `Ok(false)` - Unknown, replaced, already used or expired token
    async fn consume_verification_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError>;

    /// Store a new pending verification token for an unverified user
    ///
    /// Only the token columns are written, and only while the user is live
    /// and still unverified, so a concurrent verification is never undone.
    ///
    /// # Returns
    /// * `Ok(true)` - The token was replaced
    /// * `Ok(false)` - The user is verified or gone
    async fn replace_verification_token(
        &self,
        id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, DomainError>;

    /// Create a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError::Auth(AuthError::DuplicateIdentity))` - Email already taken
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Persist changes to an existing user
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - No live user with that ID
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Soft-delete a user
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - No live user with that ID
    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}

//! Repository trait for user identity-provider links.

use async_trait::async_trait;

use crate::domain::entities::auth_provider::{ProviderType, UserAuthProvider};
use crate::errors::DomainError;

/// Persistence for `UserAuthProvider` records
///
/// Links are immutable once created.
#[async_trait]
pub trait AuthProviderRepository: Send + Sync {
    /// Create a provider link
    ///
    /// # Returns
    /// * `Err(DomainError::Conflict)` - `(provider, provider_subject_id)` already linked
    async fn create(&self, link: UserAuthProvider) -> Result<UserAuthProvider, DomainError>;

    /// Find the link for a subject at a provider
    async fn find_by_provider_and_subject(
        &self,
        provider: ProviderType,
        subject_id: &str,
    ) -> Result<Option<UserAuthProvider>, DomainError>;
}

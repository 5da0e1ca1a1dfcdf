//! Mock implementation of AuthProviderRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::auth_provider::{ProviderType, UserAuthProvider};
use crate::errors::DomainError;

use super::r#trait::AuthProviderRepository;

/// Mock provider-link repository keyed by `(provider, subject)`
pub struct MockAuthProviderRepository {
    links: Arc<RwLock<HashMap<(ProviderType, String), UserAuthProvider>>>,
    fail_creates: AtomicBool,
}

impl MockAuthProviderRepository {
    pub fn new() -> Self {
        Self {
            links: Arc::new(RwLock::new(HashMap::new())),
            fail_creates: AtomicBool::new(false),
        }
    }

    /// Make subsequent `create` calls fail with a storage error
    pub fn set_fail_creates(&self, fail: bool) {
        self.fail_creates.store(fail, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.links.read().await.len()
    }
}

impl Default for MockAuthProviderRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthProviderRepository for MockAuthProviderRepository {
    async fn create(&self, link: UserAuthProvider) -> Result<UserAuthProvider, DomainError> {
        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(DomainError::storage("Failed to create auth provider", "disk full"));
        }

        let mut links = self.links.write().await;
        let key = (link.provider, link.provider_subject_id.clone());
        if links.contains_key(&key) {
            return Err(DomainError::Conflict {
                resource: "auth provider".to_string(),
            });
        }

        links.insert(key, link.clone());
        Ok(link)
    }

    async fn find_by_provider_and_subject(
        &self,
        provider: ProviderType,
        subject_id: &str,
    ) -> Result<Option<UserAuthProvider>, DomainError> {
        let links = self.links.read().await;
        Ok(links.get(&(provider, subject_id.to_string())).cloned())
    }
}

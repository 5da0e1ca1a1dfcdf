//! Mock implementation of TokenRepository for testing

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

use super::r#trait::TokenRepository;

/// Mock token repository for testing
///
/// Tokens are keyed by hash. `set_unavailable(true)` makes every call fail
/// with a storage error.
pub struct MockTokenRepository {
    tokens: Arc<RwLock<HashMap<String, RefreshToken>>>,
    unavailable: AtomicBool,
}

impl MockTokenRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
            unavailable: AtomicBool::new(false),
        }
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// All stored records belonging to a user
    pub async fn tokens_for_user(&self, user_id: Uuid) -> Vec<RefreshToken> {
        let tokens = self.tokens.read().await;
        tokens.values().filter(|t| t.user_id == user_id).cloned().collect()
    }

    /// Overwrite a stored record, e.g. to force expiry
    pub async fn put(&self, token: RefreshToken) {
        let mut tokens = self.tokens.write().await;
        tokens.insert(token.token_hash.clone(), token);
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::storage("Token store", "connection refused"));
        }
        Ok(())
    }
}

impl Default for MockTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        self.check_available()?;
        let mut tokens = self.tokens.write().await;

        if tokens.contains_key(&token.token_hash) {
            return Err(DomainError::Conflict {
                resource: "refresh token".to_string(),
            });
        }

        tokens.insert(token.token_hash.clone(), token.clone());
        Ok(token)
    }

    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError> {
        self.check_available()?;
        let tokens = self.tokens.read().await;
        Ok(tokens
            .get(token_hash)
            .filter(|t| t.deleted_at.is_none())
            .cloned())
    }

    async fn revoke_by_id(&self, id: Uuid) -> Result<(), DomainError> {
        self.check_available()?;
        let mut tokens = self.tokens.write().await;

        let revoked = tokens
            .values_mut()
            .find(|t| t.id == id && t.deleted_at.is_none())
            .map(|t| t.revoke(Utc::now()))
            .unwrap_or(false);

        if revoked {
            Ok(())
        } else {
            Err(DomainError::NotFound {
                resource: format!("refresh token {}", id),
            })
        }
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<u64, DomainError> {
        self.check_available()?;
        let mut tokens = self.tokens.write().await;
        let now = Utc::now();
        let mut count = 0;

        for token in tokens.values_mut() {
            if token.user_id == user_id && token.deleted_at.is_none() && token.revoke(now) {
                count += 1;
            }
        }

        Ok(count)
    }

    async fn delete_expired_tokens(&self) -> Result<u64, DomainError> {
        self.check_available()?;
        let mut tokens = self.tokens.write().await;
        let initial_count = tokens.len();

        tokens.retain(|_, token| !token.is_expired());

        Ok((initial_count - tokens.len()) as u64)
    }
}

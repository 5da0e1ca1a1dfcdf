//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};

use super::trait_::UserRepository;

/// Mock user repository for testing
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Overwrite a stored user regardless of state
    pub async fn put(&self, user: User) {
        let mut users = self.users.write().await;
        users.insert(user.id, user);
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).filter(|u| !u.is_deleted()).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.email == email && !u.is_deleted())
            .cloned())
    }

    async fn exists_by_email(
        &self,
        email: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .any(|u| u.email == email && Some(u.id) != exclude_id))
    }

    async fn find_by_verification_token(&self, token: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.email_verification_token.as_deref() == Some(token) && !u.is_deleted())
            .cloned())
    }

    async fn consume_verification_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;

        let holder = users.values_mut().find(|u| {
            u.email_verification_token.as_deref() == Some(token) && !u.is_deleted()
        });
        match holder {
            Some(user) if !user.is_verification_expired_at(now) => {
                user.mark_email_verified(now);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn replace_verification_token(
        &self,
        id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;

        match users.get_mut(&id) {
            Some(user) if !user.is_deleted() && !user.is_email_verified() => {
                user.set_verification_token(token.to_string(), expires_at);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::DuplicateIdentity.into());
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        match users.get(&user.id) {
            Some(existing) if !existing.is_deleted() => {
                users.insert(user.id, user.clone());
                Ok(user)
            }
            _ => Err(DomainError::NotFound {
                resource: format!("user {}", user.id),
            }),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let mut users = self.users.write().await;

        match users.get_mut(&id) {
            Some(user) if !user.is_deleted() => {
                user.deleted_at = Some(Utc::now());
                Ok(())
            }
            _ => Err(DomainError::NotFound {
                resource: format!("user {}", id),
            }),
        }
    }
}

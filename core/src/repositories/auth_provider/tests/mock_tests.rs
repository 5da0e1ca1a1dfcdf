//! Unit tests for mock auth provider repository

use uuid::Uuid;

use crate::domain::entities::auth_provider::{ProviderType, UserAuthProvider};
use crate::errors::DomainError;
use crate::repositories::auth_provider::{AuthProviderRepository, MockAuthProviderRepository};

#[tokio::test]
async fn test_create_and_find_link() {
    let repo = MockAuthProviderRepository::new();
    let user_id = Uuid::new_v4();

    repo.create(UserAuthProvider::credentials(user_id, "alice@example.com"))
        .await
        .unwrap();

    let found = repo
        .find_by_provider_and_subject(ProviderType::Credentials, "alice@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.user_id, user_id);

    let other_provider = repo
        .find_by_provider_and_subject(ProviderType::Google, "alice@example.com")
        .await
        .unwrap();
    assert!(other_provider.is_none());
}

#[tokio::test]
async fn test_duplicate_link_is_conflict() {
    let repo = MockAuthProviderRepository::new();

    repo.create(UserAuthProvider::credentials(Uuid::new_v4(), "a@b.c"))
        .await
        .unwrap();
    let result = repo
        .create(UserAuthProvider::credentials(Uuid::new_v4(), "a@b.c"))
        .await;

    assert!(matches!(result, Err(DomainError::Conflict { .. })));
    assert_eq!(repo.len().await, 1);
}

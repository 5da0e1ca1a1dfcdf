//! Unit tests for auth provider links

use uuid::Uuid;

use crate::domain::entities::auth_provider::{ProviderType, UserAuthProvider};

#[test]
fn test_credentials_link_uses_email_as_subject() {
    let user_id = Uuid::new_v4();
    let link = UserAuthProvider::credentials(user_id, "alice@example.com");

    assert_eq!(link.user_id, user_id);
    assert_eq!(link.provider, ProviderType::Credentials);
    assert_eq!(link.provider_subject_id, "alice@example.com");
}

#[test]
fn test_provider_type_round_trip_through_str() {
    for provider in [ProviderType::Credentials, ProviderType::Google, ProviderType::Facebook] {
        assert_eq!(provider.as_str().parse::<ProviderType>().unwrap(), provider);
    }
    assert!("github".parse::<ProviderType>().is_err());
}

#[test]
fn test_provider_type_serializes_lowercase() {
    let json = serde_json::to_string(&ProviderType::Google).unwrap();
    assert_eq!(json, "\"google\"");
}

//! Unit tests for token service

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, RefreshToken};
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::{MockTokenRepository, TokenRepository};
use crate::services::token::{
    generate_secure_token, hash_token, TokenService, TokenServiceConfig, TokenValidator,
};

const SECRET: &str = "test-secret-key";

fn service() -> (TokenService<MockTokenRepository>, Arc<MockTokenRepository>) {
    let repo = Arc::new(MockTokenRepository::new());
    let service = TokenService::new(repo.clone(), TokenServiceConfig::new(SECRET));
    (service, repo)
}

fn alice() -> User {
    User::new("Alice", "alice@example.com", "hash".to_string())
}

fn is_invalid_token(result: Result<impl std::fmt::Debug, DomainError>) -> bool {
    matches!(result, Err(DomainError::Token(TokenError::InvalidToken)))
}

#[test]
fn test_generate_secure_token_shape() {
    let token = generate_secure_token().unwrap();
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    assert_ne!(token, generate_secure_token().unwrap());
}

#[test]
fn test_hash_token_is_sha256_hex() {
    assert_eq!(
        hash_token("abc"),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    assert_eq!(hash_token("abc"), hash_token("abc"));
}

#[tokio::test]
async fn test_issue_token_pair_stores_only_hash() {
    let (service, repo) = service();
    let user = alice();

    let pair = service.issue_token_pair(&user).await.unwrap();

    let stored = repo.tokens_for_user(user.id).await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].token_hash, hash_token(&pair.refresh_token));
    assert_ne!(stored[0].token_hash, pair.refresh_token);
    assert_eq!((stored[0].expires_at - stored[0].created_at).num_days(), 7);

    let remaining = (pair.expires_at - Utc::now()).num_seconds();
    assert!(remaining > 880 && remaining <= 900);
}

#[tokio::test]
async fn test_validate_access_token_round_trip() {
    let (service, _) = service();
    let user = alice();
    let pair = service.issue_token_pair(&user).await.unwrap();

    let identity = service.validate_access_token(&pair.access_token).unwrap();
    assert_eq!(identity.user_id, user.id);
    assert_eq!(identity.email, "alice@example.com");
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let (service, _) = service();
    let other = TokenService::new(
        Arc::new(MockTokenRepository::new()),
        TokenServiceConfig::new("another-secret"),
    );
    let pair = other.issue_token_pair(&alice()).await.unwrap();

    assert!(is_invalid_token(service.validate_access_token(&pair.access_token)));
}

#[test]
fn test_unexpected_algorithm_is_rejected() {
    let (service, _) = service();
    let claims = Claims::new_access_token(Uuid::new_v4(), "a@b.c", Duration::minutes(15));
    let token = encode(
        &Header::new(Algorithm::HS384),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    assert!(is_invalid_token(service.validate_access_token(&token)));
}

#[test]
fn test_expired_token_is_rejected() {
    let (service, _) = service();
    let mut claims = Claims::new_access_token(Uuid::new_v4(), "a@b.c", Duration::minutes(15));
    claims.iat -= 3600;
    claims.exp = Utc::now().timestamp() - 10;
    let token = service.encode_jwt(&claims).unwrap();

    assert!(is_invalid_token(service.validate_access_token(&token)));
}

#[test]
fn test_malformed_token_is_rejected() {
    let (service, _) = service();
    assert!(is_invalid_token(service.validate_access_token("not.a.jwt")));
    assert!(is_invalid_token(service.validate_access_token("")));
}

#[test]
fn test_non_uuid_subject_is_rejected() {
    let (service, _) = service();
    let mut claims = Claims::new_access_token(Uuid::new_v4(), "a@b.c", Duration::minutes(15));
    claims.sub = "user-42".to_string();
    let token = service.encode_jwt(&claims).unwrap();

    assert!(service.verify_access_token(&token).is_ok());
    assert!(is_invalid_token(service.validate_access_token(&token)));
}

#[tokio::test]
async fn test_consume_refresh_token_revokes_it() {
    let (service, repo) = service();
    let user = alice();
    let pair = service.issue_token_pair(&user).await.unwrap();

    let consumed = service.consume_refresh_token(&pair.refresh_token).await.unwrap();
    assert_eq!(consumed.user_id, user.id);

    let stored = repo.find_by_hash(&hash_token(&pair.refresh_token)).await.unwrap().unwrap();
    assert!(stored.is_revoked());

    let again = service.consume_refresh_token(&pair.refresh_token).await;
    assert!(matches!(again, Err(DomainError::Auth(AuthError::InvalidCredentials))));
}

#[tokio::test]
async fn test_unknown_and_expired_refresh_tokens_share_error() {
    let (service, repo) = service();
    let user = alice();

    let unknown = service.find_usable_refresh_token("nope").await;
    assert!(matches!(unknown, Err(DomainError::Auth(AuthError::InvalidCredentials))));

    let mut expired = RefreshToken::new(user.id, hash_token("stale"), Duration::days(7));
    expired.expires_at = Utc::now() - Duration::seconds(1);
    repo.put(expired).await;

    let result = service.find_usable_refresh_token("stale").await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::InvalidCredentials))));
}

#[tokio::test]
async fn test_revoke_all_for_user() {
    let (service, _) = service();
    let user = alice();
    let first = service.issue_token_pair(&user).await.unwrap();
    let second = service.issue_token_pair(&user).await.unwrap();

    assert_eq!(service.revoke_all_for_user(user.id).await.unwrap(), 2);
    assert_eq!(service.revoke_all_for_user(user.id).await.unwrap(), 0);

    for raw in [first.refresh_token, second.refresh_token] {
        assert!(service.find_usable_refresh_token(&raw).await.is_err());
    }
}

#[tokio::test]
async fn test_cleanup_expired_tokens() {
    let (service, repo) = service();
    let user = alice();
    service.issue_token_pair(&user).await.unwrap();

    let mut expired = RefreshToken::new(user.id, hash_token("old"), Duration::days(7));
    expired.expires_at = Utc::now() - Duration::days(1);
    repo.put(expired).await;

    assert_eq!(service.cleanup_expired_tokens().await.unwrap(), 1);
    assert_eq!(repo.tokens_for_user(user.id).await.len(), 1);
}

#[tokio::test]
async fn test_storage_failure_is_surfaced() {
    let (service, repo) = service();
    repo.set_unavailable(true);

    let result = service.issue_token_pair(&alice()).await;
    assert!(matches!(result, Err(DomainError::Storage { .. })));
}

#[test]
fn test_config_from_jwt_config() {
    let jwt = cfx_shared::config::JwtConfig::new("s".to_string());
    let config = TokenServiceConfig::from(&jwt);

    assert_eq!(config.access_token_ttl, Duration::minutes(15));
    assert_eq!(config.refresh_token_ttl, Duration::days(7));
}

#[tokio::test]
async fn test_oversized_lifetimes_are_clamped_and_issue() {
    let jwt = cfx_shared::config::JwtConfig::new("s".to_string())
        .with_access_expiry_minutes(1_000_000_000_000_000)
        .with_refresh_expiry_days(i64::MAX);
    let config = TokenServiceConfig::from(&jwt);

    assert_eq!(config.access_token_ttl, Duration::days(1));
    assert_eq!(config.refresh_token_ttl, Duration::days(365));

    let repo = Arc::new(MockTokenRepository::new());
    let service = TokenService::new(repo, config);
    let pair = service.issue_token_pair(&alice()).await.unwrap();
    assert!(pair.expires_at <= Utc::now() + Duration::days(1));
    assert!(service.validate_access_token(&pair.access_token).is_ok());
}

#[test]
fn test_non_positive_lifetime_is_clamped() {
    let mut jwt = cfx_shared::config::JwtConfig::new("s".to_string());
    jwt.access_token_expiry = -5;

    let config = TokenServiceConfig::from(&jwt);
    assert_eq!(config.access_token_ttl, Duration::seconds(1));
}

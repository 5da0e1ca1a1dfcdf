//! Main token service implementation

use std::sync::Arc;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, RefreshToken, TokenPair};
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::TokenRepository;

use super::config::TokenServiceConfig;
use super::validator::{AuthenticatedUser, TokenValidator};

/// Number of random bytes in an opaque refresh token
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Generate a random opaque token
///
/// # Returns
///
/// * `Ok(String)` - 32 bytes from the OS RNG, hex-encoded (64 characters)
/// * `Err(TokenError::TokenGenerationFailed)` - The OS RNG failed
pub fn generate_secure_token() -> Result<String, TokenError> {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|_| TokenError::TokenGenerationFailed)?;
    Ok(hex::encode(bytes))
}

/// Lowercase hex SHA-256 of a raw token
pub fn hash_token(raw: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Service for signing access tokens and managing refresh tokens
pub struct TokenService<R: TokenRepository> {
    pub(crate) repository: Arc<R>,
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl<R: TokenRepository> TokenService<R> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `repository` - Token repository for persistence
    /// * `config` - Token service configuration
    pub fn new(repository: Arc<R>, config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        // Only HS256 is accepted; tokens signed with anything else fail decoding
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            repository,
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Issues a token pair for a user and stores the refresh token hash
    ///
    /// # Arguments
    ///
    /// * `user` - The user the tokens are issued to
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Access token, raw refresh token and access expiry
    /// * `Err(DomainError)` - Signing, randomness or storage failed
    pub async fn issue_token_pair(&self, user: &User) -> Result<TokenPair, DomainError> {
        let claims = Claims::new_access_token(user.id, &user.email, self.config.access_token_ttl);
        let access_token = self.encode_jwt(&claims)?;

        let raw_refresh = generate_secure_token()?;
        let record = RefreshToken::new(
            user.id,
            hash_token(&raw_refresh),
            self.config.refresh_token_ttl,
        );
        self.repository.save_refresh_token(record).await?;

        debug!(user_id = %user.id, "Issued token pair");

        Ok(TokenPair::new(access_token, raw_refresh, claims.expires_at()))
    }

    /// Encodes claims into a JWT
    pub(crate) fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Verifies an access token and returns its claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims if valid
    /// * `Err(DomainError::Token(TokenError::InvalidToken))` - Bad signature,
    ///   unexpected algorithm, malformed or expired
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(kind = ?e.kind(), "Access token rejected");
                DomainError::Token(TokenError::InvalidToken)
            })
    }

    /// Looks up a refresh token that can still be exchanged
    ///
    /// Unknown, revoked and expired tokens all yield `InvalidCredentials`.
    pub async fn find_usable_refresh_token(
        &self,
        raw_token: &str,
    ) -> Result<RefreshToken, DomainError> {
        let record = self
            .repository
            .find_by_hash(&hash_token(raw_token))
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !record.is_usable() {
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(record)
    }

    /// Validates a refresh token and revokes it in one step
    ///
    /// Used by rotation. If another caller revoked the same token first, this
    /// one loses and receives `InvalidCredentials`.
    ///
    /// # Returns
    ///
    /// * `Ok(RefreshToken)` - The consumed record, now revoked
    /// * `Err(DomainError::Auth(AuthError::InvalidCredentials))` - Not usable
    pub async fn consume_refresh_token(&self, raw_token: &str) -> Result<RefreshToken, DomainError> {
        let record = self.find_usable_refresh_token(raw_token).await?;

        match self.repository.revoke_by_id(record.id).await {
            Ok(()) => Ok(record),
            Err(DomainError::NotFound { .. }) => {
                debug!(token_id = %record.id, "Refresh token already revoked by a concurrent request");
                Err(AuthError::InvalidCredentials.into())
            }
            Err(e) => Err(e),
        }
    }

    /// Revokes every unrevoked refresh token of a user
    ///
    /// # Returns
    ///
    /// * `Ok(u64)` - Number of tokens revoked
    pub async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<u64, DomainError> {
        let revoked = self.repository.revoke_all_for_user(user_id).await?;
        debug!(user_id = %user_id, revoked, "Revoked refresh tokens");
        Ok(revoked)
    }

    /// Removes expired tokens from storage
    ///
    /// # Returns
    ///
    /// * `Ok(u64)` - Number of tokens cleaned up
    pub async fn cleanup_expired_tokens(&self) -> Result<u64, DomainError> {
        let deleted = self.repository.delete_expired_tokens().await?;
        info!(deleted, "Deleted expired refresh tokens");
        Ok(deleted)
    }
}

impl<R: TokenRepository> TokenValidator for TokenService<R> {
    fn validate_access_token(&self, token: &str) -> Result<AuthenticatedUser, DomainError> {
        let claims = self.verify_access_token(token)?;
        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidToken))?;

        Ok(AuthenticatedUser {
            user_id,
            email: claims.email,
        })
    }
}

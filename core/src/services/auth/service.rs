//! Main authentication service implementation

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::entities::auth_provider::UserAuthProvider;
use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{AuthProviderRepository, TokenRepository, UserRepository};
use crate::services::notification::VerificationMailer;
use crate::services::password::{PasswordHasher, DECOY_HASH};
use crate::services::token::{AuthenticatedUser, TokenService, TokenValidator};

use super::config::AuthServiceConfig;
use super::email_utils::mask_email;

/// Result of a verification resend request as seen by the caller
///
/// Unknown emails and successful sends produce the same outcome message so
/// the response does not reveal which emails are registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResendOutcome {
    /// A new token was issued and the email dispatched
    Sent,
    /// No account matched; nothing was sent
    Suppressed,
}

impl ResendOutcome {
    /// Message shown to the caller regardless of the outcome
    pub fn generic_message(&self) -> &'static str {
        "If the email exists, a verification link has been sent"
    }
}

/// Authentication service for the account and session lifecycle
pub struct AuthService<U, T, A, P, M>
where
    U: UserRepository,
    T: TokenRepository,
    A: AuthProviderRepository,
    P: PasswordHasher,
    M: VerificationMailer,
{
    /// User repository for database operations
    user_repository: Arc<U>,
    /// Provider links created at registration
    auth_provider_repository: Arc<A>,
    /// Token service for JWT and refresh token management
    token_service: Arc<TokenService<T>>,
    password_hasher: Arc<P>,
    mailer: Arc<M>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U, T, A, P, M> AuthService<U, T, A, P, M>
where
    U: UserRepository,
    T: TokenRepository,
    A: AuthProviderRepository,
    P: PasswordHasher,
    M: VerificationMailer,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user data persistence
    /// * `auth_provider_repository` - Repository for provider links
    /// * `token_service` - Service for token management
    /// * `password_hasher` - One-way password hasher
    /// * `mailer` - Verification email delivery
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<U>,
        auth_provider_repository: Arc<A>,
        token_service: Arc<TokenService<T>>,
        password_hasher: Arc<P>,
        mailer: Arc<M>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            auth_provider_repository,
            token_service,
            password_hasher,
            mailer,
            config,
        }
    }

    pub fn token_service(&self) -> &Arc<TokenService<T>> {
        &self.token_service
    }

    /// Register a new email/password account
    ///
    /// The user is created unverified with a 24-hour verification token, and
    /// a `credentials` provider link keyed by the normalized email. A failure
    /// to send the verification email is logged and does not fail the call.
    ///
    /// # Returns
    ///
    /// * `Ok((User, String))` - The created user and the raw verification token
    /// * `Err(DomainError::Auth(AuthError::DuplicateIdentity))` - Email taken,
    ///   including by a deleted account
    /// * `Err(DomainError::Auth(AuthError::HashingFailure))` - Hashing failed
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<(User, String)> {
        let normalized_email = User::normalize_email(email);

        if self
            .user_repository
            .exists_by_email(&normalized_email, None)
            .await?
        {
            return Err(AuthError::DuplicateIdentity.into());
        }

        let password_hash = self.password_hasher.hash(password)?;
        let token = Self::new_verification_token();

        let mut user = User::new(name, &normalized_email, password_hash);
        user.set_verification_token(
            token.clone(),
            Utc::now() + self.config.verification_token_ttl,
        );

        let user = self.user_repository.create(user).await?;

        self.auth_provider_repository
            .create(UserAuthProvider::credentials(user.id, &user.email))
            .await?;

        self.dispatch_verification_email(&user, &token).await;

        info!(user_id = %user.id, email = %mask_email(&user.email), "User registered");
        Ok((user, token))
    }

    /// Mark an email as verified using a pending verification token
    ///
    /// The token is consumed by one conditional write, so it succeeds at most
    /// once even under concurrent requests, and a token replaced by a resend
    /// is rejected.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The email is now verified and the token cleared
    /// * `Err(DomainError::Auth(AuthError::InvalidOrExpiredVerificationToken))` -
    ///   Unknown, already used, replaced or expired token
    pub async fn verify_email(&self, token: &str) -> DomainResult<()> {
        if token.is_empty() {
            return Err(AuthError::InvalidOrExpiredVerificationToken.into());
        }

        let user = self
            .user_repository
            .find_by_verification_token(token)
            .await?
            .ok_or(AuthError::InvalidOrExpiredVerificationToken)?;

        let now = Utc::now();
        if user.is_verification_expired_at(now) {
            return Err(AuthError::InvalidOrExpiredVerificationToken.into());
        }

        if !self
            .user_repository
            .consume_verification_token(token, now)
            .await?
        {
            debug!(user_id = %user.id, "Verification token consumed concurrently");
            return Err(AuthError::InvalidOrExpiredVerificationToken.into());
        }

        info!(user_id = %user.id, "Email verified");
        Ok(())
    }

    /// Issue a fresh verification token, replacing any pending one
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The new raw verification token
    /// * `Err(DomainError::Auth(AuthError::UnknownIdentity))` - No such account
    /// * `Err(DomainError::Auth(AuthError::AlreadyVerified))` - Nothing to verify
    pub async fn resend_verification(&self, email: &str) -> DomainResult<String> {
        let normalized_email = User::normalize_email(email);

        let user = self
            .user_repository
            .find_by_email(&normalized_email)
            .await?
            .ok_or(AuthError::UnknownIdentity)?;

        if user.is_email_verified() {
            return Err(AuthError::AlreadyVerified.into());
        }

        let token = Self::new_verification_token();
        let replaced = self
            .user_repository
            .replace_verification_token(
                user.id,
                &token,
                Utc::now() + self.config.verification_token_ttl,
            )
            .await?;

        if !replaced {
            // Verified or deleted since the lookup
            return match self.user_repository.find_by_id(user.id).await? {
                Some(_) => Err(AuthError::AlreadyVerified.into()),
                None => Err(AuthError::UnknownIdentity.into()),
            };
        }

        self.dispatch_verification_email(&user, &token).await;

        debug!(user_id = %user.id, "Verification token reissued");
        Ok(token)
    }

    /// Caller-facing variant of `resend_verification`
    ///
    /// Folds `UnknownIdentity` into a success-shaped outcome. Other errors,
    /// `AlreadyVerified` included, are returned unchanged.
    pub async fn request_verification_resend(&self, email: &str) -> DomainResult<ResendOutcome> {
        match self.resend_verification(email).await {
            Ok(_) => Ok(ResendOutcome::Sent),
            Err(DomainError::Auth(AuthError::UnknownIdentity)) => {
                debug!(email = %mask_email(email), "Resend requested for unknown email");
                Ok(ResendOutcome::Suppressed)
            }
            Err(e) => Err(e),
        }
    }

    /// Authenticate with email and password
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Fresh access and refresh tokens
    /// * `Err(DomainError::Auth(AuthError::InvalidCredentials))` - Unknown
    ///   email or wrong password
    /// * `Err(DomainError::Auth(AuthError::EmailNotVerified))` - Verification
    ///   is required and still pending
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<TokenPair> {
        let normalized_email = User::normalize_email(email);

        let user = match self.user_repository.find_by_email(&normalized_email).await? {
            Some(user) => user,
            None => {
                self.password_hasher.verify(password, DECOY_HASH);
                debug!(email = %mask_email(&normalized_email), "Login for unknown email");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !self.password_hasher.verify(password, &user.password_hash) {
            debug!(user_id = %user.id, "Login with wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        self.ensure_verified(&user)?;

        let pair = self.token_service.issue_token_pair(&user).await?;
        info!(user_id = %user.id, "User logged in");
        Ok(pair)
    }

    /// Exchange a refresh token for a new token pair
    ///
    /// The presented token is revoked before the new pair is issued, so it
    /// can be used at most once even under concurrent requests.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - The rotated token pair
    /// * `Err(DomainError::Auth(AuthError::InvalidCredentials))` - Unknown,
    ///   revoked, expired or already used token, or the user is gone
    /// * `Err(DomainError::Auth(AuthError::EmailNotVerified))` - Verification
    ///   is required and still pending
    pub async fn refresh_tokens(&self, raw_refresh_token: &str) -> DomainResult<TokenPair> {
        let consumed = self
            .token_service
            .consume_refresh_token(raw_refresh_token)
            .await?;

        let user = self
            .user_repository
            .find_by_id(consumed.user_id)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        self.ensure_verified(&user)?;

        let pair = self.token_service.issue_token_pair(&user).await?;
        debug!(user_id = %user.id, "Refresh token rotated");
        Ok(pair)
    }

    /// Revoke every refresh token of a user
    ///
    /// Idempotent. Access tokens already issued stay valid until they expire.
    pub async fn logout(&self, user_id: Uuid) -> DomainResult<()> {
        let revoked = self.token_service.revoke_all_for_user(user_id).await?;
        info!(user_id = %user_id, revoked, "User logged out");
        Ok(())
    }

    fn ensure_verified(&self, user: &User) -> DomainResult<()> {
        if self.config.require_verified_email && !user.is_email_verified() {
            return Err(AuthError::EmailNotVerified.into());
        }
        Ok(())
    }

    async fn dispatch_verification_email(&self, user: &User, token: &str) {
        if let Err(e) = self
            .mailer
            .send_verification_email(&user.email, &user.name, token)
            .await
        {
            warn!(
                user_id = %user.id,
                email = %mask_email(&user.email),
                error = %e,
                "Failed to send verification email"
            );
        }
    }

    fn new_verification_token() -> String {
        Uuid::new_v4().to_string()
    }
}

impl<U, T, A, P, M> TokenValidator for AuthService<U, T, A, P, M>
where
    U: UserRepository,
    T: TokenRepository,
    A: AuthProviderRepository,
    P: PasswordHasher,
    M: VerificationMailer,
{
    fn validate_access_token(&self, token: &str) -> Result<AuthenticatedUser, DomainError> {
        self.token_service.validate_access_token(token)
    }
}

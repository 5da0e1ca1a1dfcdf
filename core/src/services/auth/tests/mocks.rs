//! Test doubles for the authentication service

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::repositories::{MockAuthProviderRepository, MockTokenRepository, MockUserRepository};
use crate::services::auth::{AuthService, AuthServiceConfig};
use crate::services::notification::VerificationMailer;
use crate::errors::AuthError;
use crate::services::password::{BcryptPasswordHasher, PasswordHasher};
use crate::services::token::{TokenService, TokenServiceConfig};

/// Mailer that records every message and can be told to fail
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<(String, String, String)>>,
    pub fail: AtomicBool,
}

impl RecordingMailer {
    pub fn failing() -> Self {
        let mailer = Self::default();
        mailer.fail.store(true, Ordering::SeqCst);
        mailer
    }

    pub fn last_token(&self) -> Option<String> {
        self.sent.lock().unwrap().last().map(|(_, _, token)| token.clone())
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl VerificationMailer for RecordingMailer {
    async fn send_verification_email(
        &self,
        to: &str,
        name: &str,
        token: &str,
    ) -> Result<(), String> {
        if self.fail.load(Ordering::SeqCst) {
            return Err("smtp unavailable".to_string());
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), name.to_string(), token.to_string()));
        Ok(())
    }
}

/// Low-cost bcrypt that remembers which hashes it was asked to check
pub struct RecordingHasher {
    inner: BcryptPasswordHasher,
    pub verified: Mutex<Vec<String>>,
}

impl Default for RecordingHasher {
    fn default() -> Self {
        Self {
            inner: BcryptPasswordHasher::with_cost(4),
            verified: Mutex::new(Vec::new()),
        }
    }
}

impl RecordingHasher {
    pub fn verify_calls(&self) -> usize {
        self.verified.lock().unwrap().len()
    }
}

impl PasswordHasher for RecordingHasher {
    fn hash(&self, plaintext: &str) -> Result<String, AuthError> {
        self.inner.hash(plaintext)
    }

    fn verify(&self, plaintext: &str, hash: &str) -> bool {
        self.verified.lock().unwrap().push(hash.to_string());
        self.inner.verify(plaintext, hash)
    }
}

pub type TestAuthService = AuthService<
    MockUserRepository,
    MockTokenRepository,
    MockAuthProviderRepository,
    RecordingHasher,
    RecordingMailer,
>;

/// Service plus handles on its collaborators
pub struct Harness {
    pub service: TestAuthService,
    pub users: Arc<MockUserRepository>,
    pub tokens: Arc<MockTokenRepository>,
    pub providers: Arc<MockAuthProviderRepository>,
    pub hasher: Arc<RecordingHasher>,
    pub mailer: Arc<RecordingMailer>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with(AuthServiceConfig::default(), RecordingMailer::default())
    }

    pub fn with(config: AuthServiceConfig, mailer: RecordingMailer) -> Self {
        let users = Arc::new(MockUserRepository::new());
        let tokens = Arc::new(MockTokenRepository::new());
        let providers = Arc::new(MockAuthProviderRepository::new());
        let hasher = Arc::new(RecordingHasher::default());
        let mailer = Arc::new(mailer);

        let token_service = Arc::new(TokenService::new(
            tokens.clone(),
            TokenServiceConfig::new("test-secret"),
        ));

        let service = AuthService::new(
            users.clone(),
            providers.clone(),
            token_service,
            hasher.clone(),
            mailer.clone(),
            config,
        );

        Self {
            service,
            users,
            tokens,
            providers,
            hasher,
            mailer,
        }
    }
}

use async_trait::async_trait;
use tracing::debug;

/// Delivery of email verification messages
#[async_trait]
pub trait VerificationMailer: Send + Sync {
    /// Send a verification link or token to a user
    async fn send_verification_email(&self, to: &str, name: &str, token: &str)
        -> Result<(), String>;
}

/// Mailer that drops every message
#[derive(Debug, Clone, Default)]
pub struct NoopMailer;

#[async_trait]
impl VerificationMailer for NoopMailer {
    async fn send_verification_email(
        &self,
        _to: &str,
        name: &str,
        _token: &str,
    ) -> Result<(), String> {
        debug!(name, "Verification email suppressed");
        Ok(())
    }
}

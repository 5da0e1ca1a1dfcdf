//! Domain-specific error types for authentication, tokens and credentials
//!
//! Several variants deliberately collapse distinct causes into one error so
//! callers cannot learn which identities exist or why a token was rejected.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Bad login, or an unknown, expired or revoked refresh token
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email not verified")]
    EmailNotVerified,

    #[error("Invalid or expired verification token")]
    InvalidOrExpiredVerificationToken,

    #[error("Email already verified")]
    AlreadyVerified,

    /// The normalized email is taken, including by a deleted account
    #[error("Email already registered")]
    DuplicateIdentity,

    /// Never shown to end users as-is
    #[error("Unknown identity")]
    UnknownIdentity,

    #[error("Password hashing failed")]
    HashingFailure,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Bad signature, unexpected algorithm, malformed or expired access token
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Errors raised while fetching database credentials from the secret store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Secret source failure: {message}")]
    Source { message: String },

    #[error("Secret value is empty")]
    EmptySecret,

    #[error("Failed to parse secret JSON: {reason}")]
    MalformedSecret { reason: String },

    #[error("Credential fetch deadline exceeded")]
    DeadlineExceeded,
}

impl CredentialError {
    /// Wrap an error reported by the underlying secret store client
    pub fn source(err: impl std::fmt::Display) -> Self {
        CredentialError::Source {
            message: err.to_string(),
        }
    }
}

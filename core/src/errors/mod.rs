//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

pub use types::{AuthError, CredentialError, TokenError};

use cfx_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};
use thiserror::Error;

/// Core domain errors
///
/// The `Auth` and `Token` variants are domain outcomes meant for translation
/// into a protocol response. `Storage`, `Conflict` and `Credential` are
/// infrastructure failures and should be logged at the boundary.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// A uniqueness constraint was hit in storage
    #[error("Conflict: {resource} already exists")]
    Conflict { resource: String },

    #[error("Storage failure: {message}")]
    Storage { message: String },

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Credential(#[from] CredentialError),
}

impl DomainError {
    /// Wrap a storage driver error with context
    pub fn storage(context: &str, err: impl std::fmt::Display) -> Self {
        DomainError::Storage {
            message: format!("{}: {}", context, err),
        }
    }

    /// Whether this error comes from infrastructure rather than the domain
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            DomainError::Storage { .. }
                | DomainError::Credential(_)
                | DomainError::Conflict { .. }
        )
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

impl IntoErrorResponse for DomainError {
    fn to_error_response(&self) -> ErrorResponse {
        match self {
            DomainError::Auth(err) => {
                let code = match err {
                    AuthError::InvalidCredentials => error_codes::INVALID_CREDENTIALS,
                    AuthError::EmailNotVerified => error_codes::EMAIL_NOT_VERIFIED,
                    AuthError::InvalidOrExpiredVerificationToken => {
                        error_codes::VERIFICATION_TOKEN_INVALID
                    }
                    AuthError::AlreadyVerified => error_codes::EMAIL_ALREADY_VERIFIED,
                    AuthError::DuplicateIdentity => error_codes::EMAIL_ALREADY_EXISTS,
                    AuthError::UnknownIdentity => error_codes::USER_NOT_FOUND,
                    AuthError::HashingFailure => error_codes::INTERNAL_ERROR,
                };
                ErrorResponse::new(code, err.to_string())
            }
            DomainError::Token(TokenError::InvalidToken) => {
                ErrorResponse::new(error_codes::TOKEN_INVALID, "Invalid or expired token")
            }
            DomainError::NotFound { .. } => {
                ErrorResponse::new(error_codes::NOT_FOUND, "Resource not found")
            }
            DomainError::Credential(_) => ErrorResponse::new(
                error_codes::SERVICE_UNAVAILABLE,
                "Service temporarily unavailable",
            ),
            // Storage details stay in the logs
            DomainError::Token(TokenError::TokenGenerationFailed)
            | DomainError::Conflict { .. }
            | DomainError::Storage { .. } => {
                ErrorResponse::new(error_codes::INTERNAL_ERROR, "Internal server error")
            }
        }
    }
}

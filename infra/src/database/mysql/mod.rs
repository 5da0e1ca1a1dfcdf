//! MySQL repository implementations
//!
//! UUIDs are stored as `CHAR(36)` strings and timestamps as UTC `DATETIME(6)`.

mod auth_provider_repository_impl;
mod token_repository_impl;
mod user_repository_impl;

pub use auth_provider_repository_impl::MySqlAuthProviderRepository;
pub use token_repository_impl::MySqlTokenRepository;
pub use user_repository_impl::MySqlUserRepository;

use cfx_core::errors::DomainError;
use uuid::Uuid;

/// Whether a driver error is a unique-key violation
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Parse a `CHAR(36)` column back into a UUID
pub(crate) fn parse_uuid(column: &str, value: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(value)
        .map_err(|e| DomainError::storage(&format!("Invalid UUID in {}", column), e))
}

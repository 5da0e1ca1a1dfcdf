//! # Cloudflax Infrastructure
//!
//! Concrete adapters for the ports defined in `cfx_core`:
//! - **Database**: MySQL repositories and the connection pool, built on SQLx
//! - **Secrets**: credential sources backed by AWS Secrets Manager or the
//!   process environment
//! - **Telemetry**: `tracing` subscriber setup
//! - **Bootstrap**: startup wiring from configuration to ready services
//!
//! ## Features
//!
//! - `mysql`: MySQL repositories and pool (default)
//! - `aws-secrets`: AWS Secrets Manager credential source (default)

use cfx_core::errors::CredentialError;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Credential sources for the database secret
pub mod secrets;

/// Logging and tracing setup
pub mod telemetry;

/// Startup wiring
#[cfg(all(feature = "mysql", feature = "aws-secrets"))]
pub mod bootstrap;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failure
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Database credentials could not be obtained
    #[error("Credential error: {0}")]
    Credentials(#[from] CredentialError),

    /// Subscriber installation failed
    #[error("Telemetry error: {0}")]
    Telemetry(String),
}

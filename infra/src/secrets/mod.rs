//! Credential sources for the database secret
//!
//! Each source implements `cfx_core::services::CredentialSource` and is meant
//! to sit behind a `CredentialCache`.

#[cfg(feature = "aws-secrets")]
mod aws_secrets;
mod env_source;


#[cfg(feature = "aws-secrets")]
pub use aws_secrets::AwsSecretsManagerSource;
pub use env_source::{EnvCredentialSource, DEFAULT_CREDENTIALS_VAR};

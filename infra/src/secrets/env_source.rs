//! Environment variable credential source
//!
//! Serves the same JSON blob the secret store would return. Used for local
//! runs without a secret store and in tests.

use async_trait::async_trait;

use cfx_core::errors::CredentialError;
use cfx_core::services::CredentialSource;

/// Variable read by `EnvCredentialSource::default()`
pub const DEFAULT_CREDENTIALS_VAR: &str = "DB_CREDENTIALS_JSON";

/// Reads the credential blob from an environment variable on every fetch
#[derive(Debug, Clone)]
pub struct EnvCredentialSource {
    var: String,
}

impl EnvCredentialSource {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    pub fn var(&self) -> &str {
        &self.var
    }
}

impl Default for EnvCredentialSource {
    fn default() -> Self {
        Self::new(DEFAULT_CREDENTIALS_VAR)
    }
}

#[async_trait]
impl CredentialSource for EnvCredentialSource {
    async fn fetch_secret(&self) -> Result<String, CredentialError> {
        match std::env::var(&self.var) {
            Ok(value) if !value.trim().is_empty() => Ok(value),
            Ok(_) => Err(CredentialError::EmptySecret),
            Err(std::env::VarError::NotPresent) => {
                Err(CredentialError::source(format!("{} is not set", self.var)))
            }
            Err(e) => Err(CredentialError::source(format!("{}: {}", self.var, e))),
        }
    }
}

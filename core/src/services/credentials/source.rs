use async_trait::async_trait;

use crate::domain::value_objects::DBCredentials;
use crate::errors::CredentialError;

/// Raw access to an external secret store holding database credentials
#[async_trait]
pub trait CredentialSource: Send + Sync {
    /// Fetch the serialized credential blob
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The secret string, expected to be JSON
    /// * `Err(CredentialError::Source)` - The store could not be reached or refused
    async fn fetch_secret(&self) -> Result<String, CredentialError>;

    /// Fetch and parse the credentials
    ///
    /// Empty secrets and malformed JSON are errors.
    async fn fetch_credentials(&self) -> Result<DBCredentials, CredentialError> {
        let raw = self.fetch_secret().await?;
        DBCredentials::from_secret_string(&raw)
    }
}

#[async_trait]
impl<S: CredentialSource + ?Sized> CredentialSource for std::sync::Arc<S> {
    async fn fetch_secret(&self) -> Result<String, CredentialError> {
        (**self).fetch_secret().await
    }
}

//! AWS Secrets Manager credential source

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_secretsmanager::config::Credentials;
use aws_sdk_secretsmanager::error::DisplayErrorContext;
use aws_sdk_secretsmanager::Client as SecretsManagerClient;

use cfx_core::errors::CredentialError;
use cfx_core::services::CredentialSource;
use cfx_shared::config::SecretsConfig;

/// Reads the database secret from AWS Secrets Manager
///
/// With an endpoint override and static keys in the configuration (LocalStack),
/// those keys replace the default AWS credential chain.
pub struct AwsSecretsManagerSource {
    client: SecretsManagerClient,
    secret_name: String,
}

impl AwsSecretsManagerSource {
    /// Build a client from the secret store configuration
    pub async fn from_config(config: &SecretsConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()));

        if let Some(endpoint) = &config.endpoint_url {
            tracing::info!(endpoint = %endpoint, "Using secret store endpoint override");
            loader = loader.endpoint_url(endpoint.clone());
        }

        if config.uses_static_keys() {
            if let (Some(access_key), Some(secret_key)) =
                (&config.access_key_id, &config.secret_access_key)
            {
                loader = loader.credentials_provider(Credentials::new(
                    access_key.clone(),
                    secret_key.clone(),
                    None,
                    None,
                    "cloudflax-static",
                ));
            }
        }

        let sdk_config = loader.load().await;
        Self::with_client(SecretsManagerClient::new(&sdk_config), config.secret_name.clone())
    }

    /// Use an already configured client
    pub fn with_client(client: SecretsManagerClient, secret_name: impl Into<String>) -> Self {
        Self {
            client,
            secret_name: secret_name.into(),
        }
    }

    pub fn secret_name(&self) -> &str {
        &self.secret_name
    }
}

#[async_trait]
impl CredentialSource for AwsSecretsManagerSource {
    async fn fetch_secret(&self) -> Result<String, CredentialError> {
        tracing::debug!(secret = %self.secret_name, "Fetching secret from AWS Secrets Manager");

        let response = self
            .client
            .get_secret_value()
            .secret_id(&self.secret_name)
            .send()
            .await
            .map_err(|e| CredentialError::source(DisplayErrorContext(&e)))?;

        match response.secret_string() {
            Some(value) if !value.trim().is_empty() => Ok(value.to_string()),
            _ => Err(CredentialError::EmptySecret),
        }
    }
}

//! Startup wiring
//!
//! Turns configuration into ready services: credentials are fetched from the
//! secret store through the cache, the pool is built from them, and the auth
//! service is assembled over the MySQL repositories. Any failure here is fatal.

use std::sync::Arc;

use anyhow::Context;

use cfx_core::services::{
    AuthService, AuthServiceConfig, BcryptPasswordHasher, CredentialCache, CredentialCacheConfig,
    NoopMailer, TokenService, TokenServiceConfig,
};
use cfx_shared::config::AppConfig;

use crate::database::{
    DatabasePool, MySqlAuthProviderRepository, MySqlTokenRepository, MySqlUserRepository,
};
use crate::secrets::AwsSecretsManagerSource;
use crate::telemetry;

/// Auth service over the MySQL repositories
pub type MySqlAuthService = AuthService<
    MySqlUserRepository,
    MySqlTokenRepository,
    MySqlAuthProviderRepository,
    BcryptPasswordHasher,
    NoopMailer,
>;

/// Everything a process needs after startup
pub struct AppContext {
    pub config: AppConfig,
    pub database: DatabasePool,
    pub credentials: Arc<CredentialCache<AwsSecretsManagerSource>>,
    pub token_service: Arc<TokenService<MySqlTokenRepository>>,
    pub auth_service: Arc<MySqlAuthService>,
}

/// Load `.env` and configuration, install logging, then build the context
pub async fn initialize() -> anyhow::Result<AppContext> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    telemetry::init_tracing(&config.logging).context("Failed to initialize logging")?;

    build(config).await
}

/// Build the context from an already loaded configuration
pub async fn build(config: AppConfig) -> anyhow::Result<AppContext> {
    tracing::info!(environment = %config.environment, "Initializing infrastructure");

    let source = AwsSecretsManagerSource::from_config(&config.secrets).await;
    let credentials = Arc::new(CredentialCache::new(
        source,
        CredentialCacheConfig::from(&config.secrets),
    ));

    let db_credentials = credentials
        .get_credentials()
        .await
        .with_context(|| {
            format!(
                "Failed to fetch database credentials from secret '{}'",
                config.secrets.secret_name
            )
        })?;

    let database = DatabasePool::connect(&db_credentials, &config.database)
        .await
        .context("Failed to connect to the database")?;
    tracing::info!(stats = %database.statistics(), "Database ready");

    let pool = database.get_pool().clone();
    let token_service = Arc::new(TokenService::new(
        Arc::new(MySqlTokenRepository::new(pool.clone())),
        TokenServiceConfig::from(&config.auth.jwt),
    ));

    let auth_service = Arc::new(AuthService::new(
        Arc::new(MySqlUserRepository::new(pool.clone())),
        Arc::new(MySqlAuthProviderRepository::new(pool)),
        Arc::clone(&token_service),
        Arc::new(BcryptPasswordHasher::new()),
        Arc::new(NoopMailer),
        AuthServiceConfig::from(&config.auth),
    ));

    tracing::info!("Infrastructure initialized");

    Ok(AppContext {
        config,
        database,
        credentials,
        token_service,
        auth_service,
    })
}

//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `auth` - Token signing and email verification policy
//! - `database` - Database pool settings (credentials come from the secret store)
//! - `environment` - Environment detection and logging configuration
//! - `secrets` - External secret store and credential cache settings

pub mod auth;
pub mod database;
pub mod environment;
pub mod secrets;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use auth::{AuthConfig, JwtConfig};
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use secrets::SecretsConfig;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} is required")]
    Missing { key: &'static str },

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("Failed to read configuration sources: {0}")]
    Source(#[from] config::ConfigError),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Database pool configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Secret store configuration
    pub secrets: SecretsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            secrets: SecretsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

/// Flat view of the process environment (and optional config file)
///
/// Every field is optional; defaults are applied when building `AppConfig`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSettings {
    jwt_secret: Option<String>,
    access_token_expiry_minutes: Option<i64>,
    refresh_token_expiry_days: Option<i64>,
    require_verified_email: Option<bool>,
    aws_secret_name: Option<String>,
    aws_region: Option<String>,
    aws_endpoint_url: Option<String>,
    aws_access_key_id: Option<String>,
    aws_secret_access_key: Option<String>,
    app_env: Option<String>,
    secrets_cache_ttl_seconds: Option<u64>,
    secrets_fetch_timeout_seconds: Option<u64>,
    db_max_connections: Option<u32>,
    db_connect_timeout: Option<u64>,
    log_level: Option<String>,
    log_format: Option<LogFormat>,
}

impl AppConfig {
    /// Load configuration from the environment
    ///
    /// An optional per-environment file (e.g. `config.development.toml`) is read
    /// first; environment variables override it. The result is validated before
    /// it is returned.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();

        let raw: RawSettings = config::Config::builder()
            .add_source(config::File::with_name(environment.config_file()).required(false))
            .add_source(config::Environment::default())
            .build()?
            .try_deserialize()?;

        let config = Self::from_raw(environment, raw);
        config.validate()?;
        Ok(config)
    }

    fn from_raw(environment: Environment, raw: RawSettings) -> Self {
        let mut logging = LoggingConfig::for_environment(environment);
        if let Some(level) = raw.log_level {
            logging.level = level;
        }
        if let Some(format) = raw.log_format {
            logging.format = format;
        }

        let mut jwt = JwtConfig::new(raw.jwt_secret.unwrap_or_default());
        if let Some(minutes) = raw.access_token_expiry_minutes {
            jwt = jwt.with_access_expiry_minutes(minutes);
        }
        if let Some(days) = raw.refresh_token_expiry_days {
            jwt = jwt.with_refresh_expiry_days(days);
        }

        let mut database = DatabaseConfig::default();
        if let Some(max) = raw.db_max_connections {
            database = database.with_max_connections(max);
        }
        if let Some(timeout) = raw.db_connect_timeout {
            database.connect_timeout = timeout;
        }

        let defaults = SecretsConfig::default();
        let endpoint_url = raw
            .aws_endpoint_url
            .filter(|url| !url.is_empty())
            .or_else(|| SecretsConfig::default_endpoint_for(raw.app_env.as_deref()));

        let secrets = SecretsConfig {
            secret_name: raw.aws_secret_name.unwrap_or_default(),
            region: raw.aws_region.unwrap_or(defaults.region),
            endpoint_url,
            access_key_id: raw.aws_access_key_id,
            secret_access_key: raw.aws_secret_access_key,
            cache_ttl_seconds: raw.secrets_cache_ttl_seconds.unwrap_or(defaults.cache_ttl_seconds),
            fetch_timeout_seconds: raw
                .secrets_fetch_timeout_seconds
                .unwrap_or(defaults.fetch_timeout_seconds),
        };

        Self {
            environment,
            database,
            auth: AuthConfig {
                jwt,
                require_verified_email: raw.require_verified_email.unwrap_or(true),
            },
            secrets,
            logging,
        }
    }

    /// Verify that required configuration is present
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Missing { key: "JWT_SECRET" });
        }
        if self.environment.is_production() && self.auth.jwt.is_using_default_secret() {
            return Err(ConfigError::Invalid {
                key: "JWT_SECRET",
                reason: "the development secret cannot be used in production".to_string(),
            });
        }
        if self.secrets.secret_name.trim().is_empty() {
            return Err(ConfigError::Missing { key: "AWS_SECRET_NAME" });
        }
        check_range(
            "ACCESS_TOKEN_EXPIRY_MINUTES",
            self.auth.jwt.access_token_expiry,
            1,
            auth::MAX_ACCESS_TOKEN_EXPIRY_SECONDS,
        )?;
        check_range(
            "REFRESH_TOKEN_EXPIRY_DAYS",
            self.auth.jwt.refresh_token_expiry,
            1,
            auth::MAX_REFRESH_TOKEN_EXPIRY_SECONDS,
        )?;
        if self.secrets.cache_ttl_seconds > secrets::MAX_CACHE_TTL_SECONDS {
            return Err(ConfigError::Invalid {
                key: "SECRETS_CACHE_TTL_SECONDS",
                reason: format!("must be at most {}", secrets::MAX_CACHE_TTL_SECONDS),
            });
        }
        let fetch_timeout = self.secrets.fetch_timeout_seconds;
        if fetch_timeout == 0 || fetch_timeout > secrets::MAX_FETCH_TIMEOUT_SECONDS {
            return Err(ConfigError::Invalid {
                key: "SECRETS_FETCH_TIMEOUT_SECONDS",
                reason: format!("must be between 1 and {}", secrets::MAX_FETCH_TIMEOUT_SECONDS),
            });
        }
        Ok(())
    }
}

/// Lifetimes are stored in seconds; errors name the key the user sets
fn check_range(key: &'static str, seconds: i64, min: i64, max: i64) -> Result<(), ConfigError> {
    if seconds < min || seconds > max {
        return Err(ConfigError::Invalid {
            key,
            reason: format!("must be between {}s and {}s, got {}s", min, max, seconds),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_with_required() -> RawSettings {
        RawSettings {
            jwt_secret: Some("test-secret".to_string()),
            aws_secret_name: Some("cloudflax/db".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_from_raw_applies_defaults() {
        let config = AppConfig::from_raw(Environment::Development, raw_with_required());

        assert_eq!(config.secrets.region, "us-east-1");
        assert_eq!(config.secrets.cache_ttl_seconds, 300);
        assert_eq!(config.secrets.fetch_timeout_seconds, 10);
        assert!(config.secrets.endpoint_url.is_none());
        assert!(config.auth.require_verified_email);
        assert_eq!(config.auth.jwt.access_token_expiry, 900);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_jwt_secret_is_rejected() {
        let mut raw = raw_with_required();
        raw.jwt_secret = None;
        let config = AppConfig::from_raw(Environment::Development, raw);

        assert!(matches!(
            config.validate(),
            Err(ConfigError::Missing { key: "JWT_SECRET" })
        ));
    }

    #[test]
    fn test_missing_secret_name_is_rejected() {
        let mut raw = raw_with_required();
        raw.aws_secret_name = Some("  ".to_string());
        let config = AppConfig::from_raw(Environment::Development, raw);

        assert!(matches!(
            config.validate(),
            Err(ConfigError::Missing { key: "AWS_SECRET_NAME" })
        ));
    }

    #[test]
    fn test_localstack_endpoint_default() {
        let mut raw = raw_with_required();
        raw.app_env = Some("localstack".to_string());
        let config = AppConfig::from_raw(Environment::Development, raw);

        assert_eq!(
            config.secrets.endpoint_url.as_deref(),
            Some("http://host.docker.internal:4566")
        );
    }

    #[test]
    fn test_overrides_are_applied() {
        let mut raw = raw_with_required();
        raw.require_verified_email = Some(false);
        raw.secrets_cache_ttl_seconds = Some(0);
        raw.db_max_connections = Some(25);
        raw.log_level = Some("trace".to_string());
        let config = AppConfig::from_raw(Environment::Staging, raw);

        assert!(!config.auth.require_verified_email);
        assert_eq!(config.secrets.cache_ttl_seconds, 0);
        assert_eq!(config.database.max_connections, 25);
        assert_eq!(config.logging.level, "trace");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_out_of_range_durations_are_rejected() {
        let mut raw = raw_with_required();
        raw.access_token_expiry_minutes = Some(1_000_000_000_000_000);
        assert!(matches!(
            AppConfig::from_raw(Environment::Development, raw).validate(),
            Err(ConfigError::Invalid { key: "ACCESS_TOKEN_EXPIRY_MINUTES", .. })
        ));

        let mut raw = raw_with_required();
        raw.refresh_token_expiry_days = Some(i64::MAX);
        assert!(matches!(
            AppConfig::from_raw(Environment::Development, raw).validate(),
            Err(ConfigError::Invalid { key: "REFRESH_TOKEN_EXPIRY_DAYS", .. })
        ));

        let mut raw = raw_with_required();
        raw.secrets_cache_ttl_seconds = Some(u64::MAX);
        assert!(matches!(
            AppConfig::from_raw(Environment::Development, raw).validate(),
            Err(ConfigError::Invalid { key: "SECRETS_CACHE_TTL_SECONDS", .. })
        ));

        let mut raw = raw_with_required();
        raw.secrets_fetch_timeout_seconds = Some(u64::MAX);
        assert!(matches!(
            AppConfig::from_raw(Environment::Development, raw).validate(),
            Err(ConfigError::Invalid { key: "SECRETS_FETCH_TIMEOUT_SECONDS", .. })
        ));
    }

    #[test]
    fn test_upper_bounds_are_accepted() {
        let mut raw = raw_with_required();
        raw.access_token_expiry_minutes = Some(24 * 60);
        raw.refresh_token_expiry_days = Some(365);
        raw.secrets_cache_ttl_seconds = Some(86_400);
        raw.secrets_fetch_timeout_seconds = Some(300);

        assert!(AppConfig::from_raw(Environment::Development, raw).validate().is_ok());
    }
}

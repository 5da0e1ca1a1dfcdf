//! Shared configuration and error payloads for the Cloudflax server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Protocol-neutral error response structures and codes

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, ConfigError, DatabaseConfig, Environment, JwtConfig, LogFormat,
    LoggingConfig, SecretsConfig,
};
pub use errors::{error_codes, ApiResult, ErrorResponse, IntoErrorResponse};

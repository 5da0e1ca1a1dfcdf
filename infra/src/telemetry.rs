//! Logging and tracing setup
//!
//! Installs a global `tracing` subscriber. `log` records emitted by SQLx are
//! forwarded into it, so slow-statement warnings land in the same output.

use tracing_subscriber::EnvFilter;

use cfx_shared::config::{LogFormat, LoggingConfig};

use crate::InfrastructureError;

/// Build the filter: `RUST_LOG` wins over the configured level
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter, InfrastructureError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            InfrastructureError::Telemetry(format!("Invalid log level '{}': {}", config.level, e))
        }),
    }
}

/// Install the global subscriber
///
/// Fails if a subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), InfrastructureError> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config)?)
        .with_target(true)
        .with_file(config.source_location)
        .with_line_number(config.source_location);

    let result = match config.format {
        LogFormat::Json => subscriber.json().try_init(),
        LogFormat::Pretty => subscriber.pretty().try_init(),
        LogFormat::Compact => subscriber.compact().try_init(),
    };
    result.map_err(|e| InfrastructureError::Telemetry(e.to_string()))?;

    tracing::info!(format = ?config.format, level = %config.level, "Logging initialized");
    Ok(())
}

//! Database connection pool management
//!
//! The pool is built from `DBCredentials` fetched from the secret store, never
//! from a connection URL in the environment.

use std::time::Duration;

use log::LevelFilter;
use sqlx::{
    mysql::{MySqlConnectOptions, MySqlPoolOptions},
    ConnectOptions, MySqlPool, Row,
};

use cfx_core::domain::value_objects::DBCredentials;
use cfx_shared::config::DatabaseConfig;

use crate::InfrastructureError;

/// Database connection pool wrapper
#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
}

impl DatabasePool {
    /// Connect options for the given credentials and pool settings
    ///
    /// Statements are logged at debug level; statements slower than
    /// `slow_query_threshold` are logged as warnings.
    pub fn connect_options(credentials: &DBCredentials, config: &DatabaseConfig) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(credentials.host())
            .port(credentials.port())
            .username(credentials.username())
            .password(credentials.password())
            .database(credentials.db_name())
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(
                LevelFilter::Warn,
                Duration::from_millis(config.slow_query_threshold),
            )
    }

    /// Create a new database connection pool
    ///
    /// # Arguments
    /// * `credentials` - Credentials fetched from the secret store
    /// * `config` - Pool sizing and timeouts
    ///
    /// # Example
    /// ```no_run
    /// use cfx_core::domain::value_objects::DBCredentials;
    /// use cfx_shared::config::DatabaseConfig;
    /// use cfx_infra::database::DatabasePool;
    ///
    /// async fn create_pool() -> Result<DatabasePool, Box<dyn std::error::Error>> {
    ///     let credentials = DBCredentials::new("localhost", 3306, "app", "secret", "cloudflax");
    ///     let pool = DatabasePool::connect(&credentials, &DatabaseConfig::default()).await?;
    ///     Ok(pool)
    /// }
    /// ```
    pub async fn connect(
        credentials: &DBCredentials,
        config: &DatabaseConfig,
    ) -> Result<Self, InfrastructureError> {
        tracing::info!(
            host = credentials.host(),
            port = credentials.port(),
            database = credentials.db_name(),
            max_connections = config.max_connections,
            "Creating database connection pool"
        );

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .max_lifetime(Duration::from_secs(config.max_lifetime))
            .test_before_acquire(true)
            .connect_with(Self::connect_options(credentials, config))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to create database pool");
                InfrastructureError::Database(e)
            })?;

        tracing::info!("Database connection pool created");
        Ok(Self { pool })
    }

    /// Get a reference to the underlying SQLx pool
    pub fn get_pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Check if the database connection is healthy
    ///
    /// # Returns
    /// * `Ok(true)` - `SELECT 1` returned 1
    /// * `Ok(false)` - The query ran but returned something else
    /// * `Err(InfrastructureError::Database)` - The query failed
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        tracing::debug!("Performing database health check");

        let row = sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Database health check failed");
                InfrastructureError::Database(e)
            })?;

        let value: i64 = row.try_get(0)?;
        if value == 1 {
            Ok(true)
        } else {
            tracing::warn!(value, "Database health check returned unexpected value");
            Ok(false)
        }
    }

    /// Current pool statistics
    pub fn statistics(&self) -> PoolStatistics {
        PoolStatistics {
            connections: self.pool.size(),
            idle_connections: self.pool.num_idle(),
            max_connections: self.pool.options().get_max_connections(),
        }
    }

    /// Apply the embedded schema migrations
    pub async fn run_migrations(&self) -> Result<(), InfrastructureError> {
        tracing::info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("Database migrations completed");
        Ok(())
    }

    /// Close all connections in the pool
    pub async fn close(&self) {
        tracing::info!("Closing database connection pool");
        self.pool.close().await;
    }
}

/// Connection pool statistics
#[derive(Debug, Clone)]
pub struct PoolStatistics {
    /// Total number of connections in the pool
    pub connections: u32,
    /// Number of idle connections
    pub idle_connections: usize,
    /// Maximum allowed connections
    pub max_connections: u32,
}

impl std::fmt::Display for PoolStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Pool Stats: {}/{} connections ({} idle)",
            self.connections, self.max_connections, self.idle_connections
        )
    }
}

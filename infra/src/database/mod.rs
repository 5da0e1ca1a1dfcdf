//! Database module - MySQL implementations using SQLx
//!
//! This module provides:
//! - Connection pool management built from fetched credentials
//! - Repository implementations for users, provider links and refresh tokens
//! - Embedded schema migrations

pub mod connection;
pub mod mysql;


// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlAuthProviderRepository, MySqlTokenRepository, MySqlUserRepository};

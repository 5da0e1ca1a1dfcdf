//! Value objects representing immutable domain concepts.

pub mod db_credentials;

// Re-export commonly used types
pub use db_credentials::DBCredentials;

//! # Cloudflax Core
//!
//! Core domain layer for the Cloudflax backend identity and credential services.
//! This crate contains domain entities, business services, repository interfaces,
//! and error types. Storage and secret-store adapters live in the infrastructure
//! crate and plug in through the traits defined here.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;

//! Token service module
//!
//! This module handles all token-related operations:
//! - HS256 access token signing and validation
//! - Opaque refresh token generation, hashing and storage
//! - Refresh token rotation and bulk revocation
//! - Removal of expired refresh tokens

mod config;
mod service;
mod validator;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use service::{generate_secure_token, hash_token, TokenService, REFRESH_TOKEN_BYTES};
pub use validator::{AuthenticatedUser, TokenValidator};

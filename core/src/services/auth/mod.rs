//! Authentication service module
//!
//! This module provides the account and session lifecycle:
//! - Email/password registration with email verification
//! - Login and refresh token rotation
//! - Logout (bulk revocation)
//! - Access token validation

mod config;
mod email_utils;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use email_utils::mask_email;
pub use service::{AuthService, ResendOutcome};

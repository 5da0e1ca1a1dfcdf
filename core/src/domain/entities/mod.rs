//! Domain entities representing core business objects.

pub mod auth_provider;
pub mod token;
pub mod user;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use auth_provider::{ProviderType, UserAuthProvider};
pub use token::{
    Claims, RefreshToken, TokenPair,
    ACCESS_TOKEN_EXPIRY_MINUTES, REFRESH_TOKEN_EXPIRY_DAYS, VERIFICATION_TOKEN_EXPIRY_HOURS,
};
pub use user::User;

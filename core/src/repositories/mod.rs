//! Repository interfaces implemented by the infrastructure layer.

pub mod auth_provider;
pub mod token;
pub mod user;

pub use auth_provider::AuthProviderRepository;
pub use token::TokenRepository;
pub use user::UserRepository;

#[cfg(test)]
pub use auth_provider::MockAuthProviderRepository;
#[cfg(test)]
pub use token::MockTokenRepository;
#[cfg(test)]
pub use user::MockUserRepository;

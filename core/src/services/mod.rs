//! Business services containing domain logic and use cases.

pub mod auth;
pub mod credentials;
pub mod notification;
pub mod password;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig, ResendOutcome};
pub use credentials::{CredentialCache, CredentialCacheConfig, CredentialSource};
pub use notification::{NoopMailer, VerificationMailer};
pub use password::{BcryptPasswordHasher, PasswordHasher};
pub use token::{AuthenticatedUser, TokenService, TokenServiceConfig, TokenValidator};

use crate::errors::AuthError;

/// Well-formed bcrypt hash at the default cost that matches no password
///
/// Checked in place of a stored hash when no account exists, so a miss
/// costs the same bcrypt round as a wrong password.
pub const DECOY_HASH: &str = "$2b$12$zKT12/4crBL/Y1WUQnUQm.GZSgr0yNmKXy4Kh5L.kenKkq8bYK.B6";

/// One-way hashing of user passwords
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Encoded hash, salt included
    /// * `Err(AuthError::HashingFailure)` - The hasher failed
    fn hash(&self, plaintext: &str) -> Result<String, AuthError>;

    /// Check a plaintext password against a stored hash
    ///
    /// Malformed hashes verify as `false`.
    fn verify(&self, plaintext: &str, hash: &str) -> bool;
}

/// bcrypt-backed hasher
#[derive(Debug, Clone)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Use a custom work factor (4..=31)
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, plaintext: &str) -> Result<String, AuthError> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| {
            tracing::error!(error = %e, "Password hashing failed");
            AuthError::HashingFailure
        })
    }

    fn verify(&self, plaintext: &str, hash: &str) -> bool {
        bcrypt::verify(plaintext, hash).unwrap_or(false)
    }
}

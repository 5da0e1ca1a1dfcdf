//! Password hashing behind a swappable trait.

mod hasher;

pub use hasher::{BcryptPasswordHasher, PasswordHasher, DECOY_HASH};

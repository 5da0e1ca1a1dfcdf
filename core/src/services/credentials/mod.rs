//! Database credential retrieval and caching
//!
//! A `CredentialSource` performs the raw call to a secret store. The
//! `CredentialCache` sits in front of it with TTL caching and a single retry.

mod cache;
mod config;
mod source;


pub use cache::CredentialCache;
pub use config::CredentialCacheConfig;
pub use source::CredentialSource;

//! User entity representing a registered account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity representing a registered account
///
/// The verification token and its expiry are either both set or both empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Normalized (trimmed, lowercased) email, unique across all accounts
    pub email: String,

    /// bcrypt hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Set once the email has been confirmed
    pub email_verified_at: Option<DateTime<Utc>>,

    /// Pending verification token
    #[serde(skip_serializing)]
    pub email_verification_token: Option<String>,

    /// Expiry of the pending verification token
    #[serde(skip_serializing)]
    pub email_verification_expires_at: Option<DateTime<Utc>>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,

    /// Soft-delete marker
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Creates a new, unverified user
    ///
    /// # Arguments
    ///
    /// * `name` - Display name
    /// * `email` - Raw email, normalized before storing
    /// * `password_hash` - bcrypt hash of the password
    pub fn new(name: impl Into<String>, email: &str, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: Self::normalize_email(email),
            password_hash,
            email_verified_at: None,
            email_verification_token: None,
            email_verification_expires_at: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Trim surrounding whitespace and lowercase
    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }

    pub fn is_email_verified(&self) -> bool {
        self.email_verified_at.is_some()
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Stores a pending verification token, replacing any previous one
    pub fn set_verification_token(&mut self, token: String, expires_at: DateTime<Utc>) {
        self.email_verification_token = Some(token);
        self.email_verification_expires_at = Some(expires_at);
        self.updated_at = Utc::now();
    }

    /// Checks whether the pending token is past its expiry
    ///
    /// A user without a pending token is treated as expired.
    pub fn is_verification_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.email_verification_expires_at {
            Some(expires_at) => now > expires_at,
            None => true,
        }
    }

    /// Marks the email as verified and clears the pending token
    pub fn mark_email_verified(&mut self, at: DateTime<Utc>) {
        self.email_verified_at = Some(at);
        self.email_verification_token = None;
        self.email_verification_expires_at = None;
        self.updated_at = at;
    }
}

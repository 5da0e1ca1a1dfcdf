//! Token entities for JWT access tokens and opaque refresh tokens.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access token expiration time (15 minutes)
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 15;

/// Refresh token expiration time (7 days)
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

/// Email verification token validity (24 hours)
pub const VERIFICATION_TOKEN_EXPIRY_HOURS: i64 = 24;

/// Claims carried in the access token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Normalized email of the user
    pub email: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for an access token
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's UUID
    /// * `email` - The user's normalized email
    /// * `lifetime` - How long the token stays valid
    ///
    /// # Returns
    ///
    /// A new `Claims` instance issued now
    pub fn new_access_token(user_id: Uuid, email: impl Into<String>, lifetime: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: user_id.to_string(),
            email: email.into(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        }
    }

    /// Gets the user ID from the claims
    ///
    /// # Returns
    ///
    /// `Ok(Uuid)` if the subject can be parsed as a UUID, `Err` otherwise
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    /// Expiry as a timestamp, falling back to the epoch for out-of-range values
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_default()
    }
}

/// Refresh token record stored in the database
///
/// Only the SHA-256 digest of the opaque token is ever persisted. A token is
/// usable only while it is neither revoked nor past `expires_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Unique identifier for the refresh token
    pub id: Uuid,

    /// User ID this token belongs to
    pub user_id: Uuid,

    /// Lowercase hex SHA-256 of the opaque token
    pub token_hash: String,

    /// Timestamp when the token expires
    pub expires_at: DateTime<Utc>,

    /// Set once when the token is revoked, never cleared
    pub revoked_at: Option<DateTime<Utc>>,

    /// Timestamp when the token was created
    pub created_at: DateTime<Utc>,

    /// Soft-delete marker
    pub deleted_at: Option<DateTime<Utc>>,
}

impl RefreshToken {
    /// Creates a new refresh token record
    ///
    /// # Arguments
    ///
    /// * `user_id` - The owner's UUID
    /// * `token_hash` - The hashed token value
    /// * `lifetime` - How long the token stays valid
    ///
    /// # Returns
    ///
    /// A new `RefreshToken` instance
    pub fn new(user_id: Uuid, token_hash: String, lifetime: Duration) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            user_id,
            token_hash,
            expires_at: now + lifetime,
            revoked_at: None,
            created_at: now,
            deleted_at: None,
        }
    }

    /// Checks if the refresh token has expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Checks expiry against a given instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Checks if the refresh token has been revoked
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Checks if the refresh token can still be exchanged
    ///
    /// # Returns
    ///
    /// `true` if the token is not revoked and not expired
    pub fn is_usable(&self) -> bool {
        !self.is_revoked() && !self.is_expired()
    }

    /// Marks the token as revoked unless it already is
    ///
    /// # Returns
    ///
    /// `true` if this call performed the revocation
    pub fn revoke(&mut self, at: DateTime<Utc>) -> bool {
        if self.revoked_at.is_some() {
            return false;
        }
        self.revoked_at = Some(at);
        true
    }
}

/// Token pair returned to clients after a successful login or refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Signed JWT access token
    pub access_token: String,

    /// Opaque refresh token, returned to the client exactly once
    pub refresh_token: String,

    /// Access token expiry
    pub expires_at: DateTime<Utc>,
}

impl TokenPair {
    /// Creates a new token pair
    pub fn new(access_token: String, refresh_token: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_at,
        }
    }
}

//! Links between a user and the identity providers they sign in with.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity provider kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    /// Email and password
    Credentials,
    Google,
    Facebook,
}

impl ProviderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderType::Credentials => "credentials",
            ProviderType::Google => "google",
            ProviderType::Facebook => "facebook",
        }
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "credentials" => Ok(ProviderType::Credentials),
            "google" => Ok(ProviderType::Google),
            "facebook" => Ok(ProviderType::Facebook),
            other => Err(format!("Unknown provider type: {}", other)),
        }
    }
}

/// A user's identity at a provider
///
/// `(provider, provider_subject_id)` is unique. For `Credentials` the subject
/// is the normalized email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAuthProvider {
    pub id: Uuid,
    pub user_id: Uuid,
    pub provider: ProviderType,
    pub provider_subject_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserAuthProvider {
    /// Creates a new provider link
    ///
    /// # Arguments
    ///
    /// * `user_id` - Owner of the identity
    /// * `provider` - Provider kind
    /// * `provider_subject_id` - Subject identifier at the provider
    pub fn new(user_id: Uuid, provider: ProviderType, provider_subject_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            provider,
            provider_subject_id: provider_subject_id.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Link for an email/password account
    pub fn credentials(user_id: Uuid, normalized_email: &str) -> Self {
        Self::new(user_id, ProviderType::Credentials, normalized_email)
    }
}

//! Database connection credentials as stored in the external secret store.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::CredentialError;

/// Database credentials parsed from the secret blob
///
/// The blob has the shape
/// `{"dbname": "...", "host": "...", "password": "...", "port": 3306, "username": "..."}`.
/// Fields are private and `Debug` redacts the password, so the value can be
/// passed around without leaking it into logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DBCredentials {
    #[serde(rename = "dbname")]
    db_name: String,
    host: String,
    password: String,
    port: u16,
    username: String,
}

impl DBCredentials {
    /// Creates credentials from their parts
    pub fn new(
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
        db_name: impl Into<String>,
    ) -> Self {
        Self {
            db_name: db_name.into(),
            host: host.into(),
            password: password.into(),
            port,
            username: username.into(),
        }
    }

    /// Parse the secret string returned by a credential source
    ///
    /// # Errors
    ///
    /// * `CredentialError::EmptySecret` - the string is empty or whitespace
    /// * `CredentialError::MalformedSecret` - not valid JSON or a field is missing
    pub fn from_secret_string(raw: &str) -> Result<Self, CredentialError> {
        if raw.trim().is_empty() {
            return Err(CredentialError::EmptySecret);
        }

        serde_json::from_str(raw).map_err(|e| CredentialError::MalformedSecret {
            reason: e.to_string(),
        })
    }

    pub fn db_name(&self) -> &str {
        &self.db_name
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl fmt::Debug for DBCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DBCredentials")
            .field("db_name", &self.db_name)
            .field("host", &self.host)
            .field("password", &"[REDACTED]")
            .field("port", &self.port)
            .field("username", &self.username)
            .finish()
    }
}

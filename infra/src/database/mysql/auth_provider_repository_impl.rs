//! MySQL implementation of the AuthProviderRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use cfx_core::domain::entities::auth_provider::{ProviderType, UserAuthProvider};
use cfx_core::errors::DomainError;
use cfx_core::repositories::AuthProviderRepository;

use super::{is_unique_violation, parse_uuid};

/// MySQL implementation of AuthProviderRepository
pub struct MySqlAuthProviderRepository {
    pool: MySqlPool,
}

impl MySqlAuthProviderRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_link(row: &sqlx::mysql::MySqlRow) -> Result<UserAuthProvider, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::storage("Failed to get id", e))?;
        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| DomainError::storage("Failed to get user_id", e))?;
        let provider: String = row
            .try_get("provider")
            .map_err(|e| DomainError::storage("Failed to get provider", e))?;

        Ok(UserAuthProvider {
            id: parse_uuid("user_auth_providers.id", &id)?,
            user_id: parse_uuid("user_auth_providers.user_id", &user_id)?,
            provider: provider
                .parse::<ProviderType>()
                .map_err(|e| DomainError::storage("Unknown provider in user_auth_providers", e))?,
            provider_subject_id: row
                .try_get("provider_subject_id")
                .map_err(|e| DomainError::storage("Failed to get provider_subject_id", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::storage("Failed to get created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::storage("Failed to get updated_at", e))?,
        })
    }
}

#[async_trait]
impl AuthProviderRepository for MySqlAuthProviderRepository {
    async fn create(&self, link: UserAuthProvider) -> Result<UserAuthProvider, DomainError> {
        let query = r#"
            INSERT INTO user_auth_providers (
                id, user_id, provider, provider_subject_id, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(link.id.to_string())
            .bind(link.user_id.to_string())
            .bind(link.provider.as_str())
            .bind(&link.provider_subject_id)
            .bind(link.created_at)
            .bind(link.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DomainError::Conflict {
                        resource: format!("{} identity", link.provider),
                    }
                } else {
                    DomainError::storage("Failed to create provider link", e)
                }
            })?;

        Ok(link)
    }

    async fn find_by_provider_and_subject(
        &self,
        provider: ProviderType,
        subject_id: &str,
    ) -> Result<Option<UserAuthProvider>, DomainError> {
        let query = r#"
            SELECT id, user_id, provider, provider_subject_id, created_at, updated_at
            FROM user_auth_providers
            WHERE provider = ? AND provider_subject_id = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(provider.as_str())
            .bind(subject_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage("Failed to find provider link", e))?;

        row.as_ref().map(Self::row_to_link).transpose()
    }
}

//! MySQL implementation of the TokenRepository trait.
//!
//! Only SHA-256 hashes of refresh tokens reach this table. Revocation is a
//! conditional `UPDATE`, so concurrent rotations of one token race on the row
//! and exactly one of them sees an affected row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use cfx_core::domain::entities::token::RefreshToken;
use cfx_core::errors::DomainError;
use cfx_core::repositories::TokenRepository;

use super::{is_unique_violation, parse_uuid};

/// MySQL implementation of TokenRepository
pub struct MySqlTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlTokenRepository {
    /// Create a new MySQL token repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_token(row: &sqlx::mysql::MySqlRow) -> Result<RefreshToken, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::storage("Failed to get id", e))?;
        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| DomainError::storage("Failed to get user_id", e))?;

        Ok(RefreshToken {
            id: parse_uuid("refresh_tokens.id", &id)?,
            user_id: parse_uuid("refresh_tokens.user_id", &user_id)?,
            token_hash: row
                .try_get("token_hash")
                .map_err(|e| DomainError::storage("Failed to get token_hash", e))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::storage("Failed to get expires_at", e))?,
            revoked_at: row
                .try_get("revoked_at")
                .map_err(|e| DomainError::storage("Failed to get revoked_at", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::storage("Failed to get created_at", e))?,
            deleted_at: row
                .try_get("deleted_at")
                .map_err(|e| DomainError::storage("Failed to get deleted_at", e))?,
        })
    }
}

#[async_trait]
impl TokenRepository for MySqlTokenRepository {
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        let query = r#"
            INSERT INTO refresh_tokens (
                id, user_id, token_hash, expires_at, revoked_at, created_at, deleted_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(token.id.to_string())
            .bind(token.user_id.to_string())
            .bind(&token.token_hash)
            .bind(token.expires_at)
            .bind(token.revoked_at)
            .bind(token.created_at)
            .bind(token.deleted_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DomainError::Conflict {
                        resource: "refresh token".to_string(),
                    }
                } else {
                    DomainError::storage("Failed to save refresh token", e)
                }
            })?;

        Ok(token)
    }

    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError> {
        let query = r#"
            SELECT id, user_id, token_hash, expires_at, revoked_at, created_at, deleted_at
            FROM refresh_tokens
            WHERE token_hash = ? AND deleted_at IS NULL
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage("Failed to find refresh token", e))?;

        row.as_ref().map(Self::row_to_token).transpose()
    }

    async fn revoke_by_id(&self, id: Uuid) -> Result<(), DomainError> {
        let query = r#"
            UPDATE refresh_tokens
            SET revoked_at = ?
            WHERE id = ? AND revoked_at IS NULL AND deleted_at IS NULL
        "#;

        let result = sqlx::query(query)
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage("Failed to revoke refresh token", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: format!("unrevoked refresh token {}", id),
            });
        }
        Ok(())
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<u64, DomainError> {
        let query = r#"
            UPDATE refresh_tokens
            SET revoked_at = ?
            WHERE user_id = ? AND revoked_at IS NULL AND deleted_at IS NULL
        "#;

        let result = sqlx::query(query)
            .bind(Utc::now())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage("Failed to revoke user tokens", e))?;

        Ok(result.rows_affected())
    }

    async fn delete_expired_tokens(&self) -> Result<u64, DomainError> {
        let query = r#"
            DELETE FROM refresh_tokens
            WHERE expires_at <= ?
        "#;

        let result = sqlx::query(query)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage("Failed to delete expired tokens", e))?;

        Ok(result.rows_affected())
    }
}

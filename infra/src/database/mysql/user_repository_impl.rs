//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use cfx_core::domain::entities::user::User;
use cfx_core::errors::{AuthError, DomainError};
use cfx_core::repositories::UserRepository;

use super::{is_unique_violation, parse_uuid};

const USER_COLUMNS: &str = r#"
    id, name, email, password_hash, email_verified_at,
    email_verification_token, email_verification_expires_at,
    created_at, updated_at, deleted_at
"#;

/// MySQL implementation of UserRepository
///
/// The `users.email` unique index spans soft-deleted rows, so a deleted
/// account keeps its email reserved.
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::storage("Failed to get id", e))?;

        Ok(User {
            id: parse_uuid("users.id", &id)?,
            name: row
                .try_get("name")
                .map_err(|e| DomainError::storage("Failed to get name", e))?,
            email: row
                .try_get("email")
                .map_err(|e| DomainError::storage("Failed to get email", e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| DomainError::storage("Failed to get password_hash", e))?,
            email_verified_at: row
                .try_get("email_verified_at")
                .map_err(|e| DomainError::storage("Failed to get email_verified_at", e))?,
            email_verification_token: row
                .try_get("email_verification_token")
                .map_err(|e| DomainError::storage("Failed to get email_verification_token", e))?,
            email_verification_expires_at: row
                .try_get("email_verification_expires_at")
                .map_err(|e| {
                    DomainError::storage("Failed to get email_verification_expires_at", e)
                })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::storage("Failed to get created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::storage("Failed to get updated_at", e))?,
            deleted_at: row
                .try_get("deleted_at")
                .map_err(|e| DomainError::storage("Failed to get deleted_at", e))?,
        })
    }

    async fn fetch_one_live(
        &self,
        filter: &str,
        value: String,
        context: &str,
    ) -> Result<Option<User>, DomainError> {
        let query = format!(
            "SELECT {} FROM users WHERE {} = ? AND deleted_at IS NULL LIMIT 1",
            USER_COLUMNS, filter
        );

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(context, e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.fetch_one_live("id", id.to_string(), "Failed to find user by id")
            .await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.fetch_one_live("email", email.to_string(), "Failed to find user by email")
            .await
    }

    async fn exists_by_email(
        &self,
        email: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, DomainError> {
        let row = match exclude_id {
            Some(id) => {
                sqlx::query("SELECT COUNT(*) AS count FROM users WHERE email = ? AND id <> ?")
                    .bind(email)
                    .bind(id.to_string())
                    .fetch_one(&self.pool)
                    .await
            }
            None => {
                sqlx::query("SELECT COUNT(*) AS count FROM users WHERE email = ?")
                    .bind(email)
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(|e| DomainError::storage("Failed to check email", e))?;

        let count: i64 = row
            .try_get("count")
            .map_err(|e| DomainError::storage("Failed to get count", e))?;
        Ok(count > 0)
    }

    async fn find_by_verification_token(&self, token: &str) -> Result<Option<User>, DomainError> {
        self.fetch_one_live(
            "email_verification_token",
            token.to_string(),
            "Failed to find user by verification token",
        )
        .await
    }

    async fn consume_verification_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE users
            SET email_verified_at = ?, email_verification_token = NULL,
                email_verification_expires_at = NULL, updated_at = ?
            WHERE email_verification_token = ?
              AND email_verification_expires_at >= ?
              AND deleted_at IS NULL
        "#;

        let result = sqlx::query(query)
            .bind(now)
            .bind(now)
            .bind(token)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage("Failed to consume verification token", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn replace_verification_token(
        &self,
        id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE users
            SET email_verification_token = ?, email_verification_expires_at = ?, updated_at = ?
            WHERE id = ? AND email_verified_at IS NULL AND deleted_at IS NULL
        "#;

        let result = sqlx::query(query)
            .bind(token)
            .bind(expires_at)
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage("Failed to replace verification token", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = format!(
            "INSERT INTO users ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            USER_COLUMNS
        );

        sqlx::query(&query)
            .bind(user.id.to_string())
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.email_verified_at)
            .bind(&user.email_verification_token)
            .bind(user.email_verification_expires_at)
            .bind(user.created_at)
            .bind(user.updated_at)
            .bind(user.deleted_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DomainError::Auth(AuthError::DuplicateIdentity)
                } else {
                    DomainError::storage("Failed to create user", e)
                }
            })?;

        tracing::debug!(user_id = %user.id, "User row inserted");
        Ok(user)
    }

    async fn update(&self, mut user: User) -> Result<User, DomainError> {
        user.updated_at = Utc::now();

        let query = r#"
            UPDATE users
            SET name = ?, email = ?, password_hash = ?, email_verified_at = ?,
                email_verification_token = ?, email_verification_expires_at = ?,
                updated_at = ?
            WHERE id = ? AND deleted_at IS NULL
        "#;

        let result = sqlx::query(query)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.email_verified_at)
            .bind(&user.email_verification_token)
            .bind(user.email_verification_expires_at)
            .bind(user.updated_at)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DomainError::Auth(AuthError::DuplicateIdentity)
                } else {
                    DomainError::storage("Failed to update user", e)
                }
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: format!("user {}", user.id),
            });
        }
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let now = Utc::now();
        let result = sqlx::query(
            "UPDATE users SET deleted_at = ?, updated_at = ? WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(now)
        .bind(now)
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage("Failed to delete user", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: format!("user {}", id),
            });
        }
        Ok(())
    }
}

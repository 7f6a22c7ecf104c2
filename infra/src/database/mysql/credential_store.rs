//! MySQL implementation of the CredentialStore trait.
//!
//! Expects a `users` table of the form:
//!
//! ```sql
//! CREATE TABLE users (
//!     id            CHAR(36)     NOT NULL PRIMARY KEY,
//!     email         VARCHAR(255) NOT NULL UNIQUE,
//!     password_hash VARCHAR(255) NOT NULL,
//!     is_active     BOOLEAN      NOT NULL DEFAULT FALSE,
//!     created_at    TIMESTAMP    NOT NULL DEFAULT CURRENT_TIMESTAMP
//! );
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use tl_core::domain::entities::user::UserIdentity;
use tl_core::errors::DomainError;
use tl_core::repositories::CredentialStore;

use crate::InfrastructureError;

/// Credential store reading the `users` table
pub struct MySqlCredentialStore {
    pool: MySqlPool,
}

impl MySqlCredentialStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<UserIdentity, DomainError> {
        let id: String = row.try_get("id").map_err(column_error)?;

        Ok(UserIdentity {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid user id {}: {}", id, e),
            })?,
            identifier: row.try_get("email").map_err(column_error)?,
            password_hash: row.try_get("password_hash").map_err(column_error)?,
            is_active: row.try_get("is_active").map_err(column_error)?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(column_error)?,
        })
    }
}

fn column_error(error: sqlx::Error) -> DomainError {
    DomainError::Internal {
        message: format!("Failed to read users row: {}", error),
    }
}

#[async_trait]
impl CredentialStore for MySqlCredentialStore {
    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<UserIdentity>, DomainError> {
        let query = r#"
            SELECT id, email, password_hash, is_active, created_at
            FROM users
            WHERE email = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(identifier)
            .fetch_optional(&self.pool)
            .await
            .map_err(InfrastructureError::Database)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn is_active(&self, identifier: &str) -> Result<Option<bool>, DomainError> {
        let row = sqlx::query("SELECT is_active FROM users WHERE email = ? LIMIT 1")
            .bind(identifier)
            .fetch_optional(&self.pool)
            .await
            .map_err(InfrastructureError::Database)?;

        row.map(|row| row.try_get::<bool, _>("is_active").map_err(column_error))
            .transpose()
    }
}

//! Identity record owned by the credential store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user as seen by the token lifecycle
///
/// The lifecycle manager only reads `identifier` and `is_active`; the
/// password hash is consumed by the login path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Login identifier, used as the token subject
    pub identifier: String,

    /// bcrypt hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Inactive users cannot obtain or refresh tokens
    pub is_active: bool,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,
}

impl UserIdentity {
    /// Creates a new, inactive identity
    pub fn new(identifier: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            identifier: identifier.into(),
            password_hash: password_hash.into(),
            is_active: false,
            created_at: Utc::now(),
        }
    }

    /// Marks the identity as active
    pub fn activate(&mut self) {
        self.is_active = true;
    }

    /// Marks the identity as inactive
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}

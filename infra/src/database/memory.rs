//! In-memory credential store for development and tests.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::info;

use tl_core::domain::entities::user::UserIdentity;
use tl_core::errors::DomainError;
use tl_core::repositories::CredentialStore;

/// User directory held in process memory
#[derive(Default)]
pub struct InMemoryCredentialStore {
    users: RwLock<HashMap<String, UserIdentity>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a user record
    pub async fn insert(&self, user: UserIdentity) {
        self.users
            .write()
            .await
            .insert(user.identifier.clone(), user);
    }

    /// Register a new, inactive user
    pub async fn register(&self, identifier: &str, password_hash: &str) -> UserIdentity {
        let user = UserIdentity::new(identifier, password_hash);
        self.insert(user.clone()).await;
        info!(subject = %identifier, "User registered");
        user
    }

    /// Mark a user active; returns false for an unknown identifier
    pub async fn activate(&self, identifier: &str) -> bool {
        self.set_active(identifier, true).await
    }

    /// Mark a user inactive; returns false for an unknown identifier
    pub async fn deactivate(&self, identifier: &str) -> bool {
        self.set_active(identifier, false).await
    }

    async fn set_active(&self, identifier: &str, active: bool) -> bool {
        let mut users = self.users.write().await;
        match users.get_mut(identifier) {
            Some(user) => {
                if active {
                    user.activate();
                } else {
                    user.deactivate();
                }
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<UserIdentity>, DomainError> {
        Ok(self.users.read().await.get(identifier).cloned())
    }
}

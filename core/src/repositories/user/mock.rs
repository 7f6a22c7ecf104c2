//! Mock implementation of CredentialStore for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::user::UserIdentity;
use crate::errors::DomainError;

use super::r#trait::CredentialStore;

/// Mock credential store for testing
#[derive(Clone)]
pub struct MockCredentialStore {
    users: Arc<RwLock<HashMap<String, UserIdentity>>>,
    unavailable: Arc<AtomicBool>,
}

impl MockCredentialStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            unavailable: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Insert or replace a user
    pub async fn insert(&self, user: UserIdentity) {
        let mut users = self.users.write().await;
        users.insert(user.identifier.clone(), user);
    }

    /// Insert an active user with the given password hash
    pub async fn insert_active(&self, identifier: &str, password_hash: &str) -> UserIdentity {
        let mut user = UserIdentity::new(identifier, password_hash);
        user.activate();
        self.insert(user.clone()).await;
        user
    }

    /// Change the activity flag of an existing user
    pub async fn set_active(&self, identifier: &str, active: bool) {
        let mut users = self.users.write().await;
        if let Some(user) = users.get_mut(identifier) {
            user.is_active = active;
        }
    }

    /// Make every subsequent lookup fail with `ServiceUnavailable`
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

impl Default for MockCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialStore for MockCredentialStore {
    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<UserIdentity>, DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::ServiceUnavailable {
                message: "mock credential store unavailable".to_string(),
            });
        }

        let users = self.users.read().await;
        Ok(users.get(identifier).cloned())
    }
}

//! Credential store trait: read access to the user directory.
//!
//! Account creation and activation are owned by the directory itself; the
//! token lifecycle only looks identities up.

use async_trait::async_trait;

use crate::domain::entities::user::UserIdentity;
use crate::errors::DomainError;

/// Read-only view of the user directory
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use tl_core::repositories::CredentialStore;
/// use tl_core::domain::entities::user::UserIdentity;
/// use tl_core::errors::DomainError;
///
/// struct LdapCredentialStore;
///
/// #[async_trait]
/// impl CredentialStore for LdapCredentialStore {
///     async fn find_by_identifier(
///         &self,
///         identifier: &str,
///     ) -> Result<Option<UserIdentity>, DomainError> {
///         // Implementation here
///         Ok(None)
///     }
/// }
/// ```
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Find a user by login identifier
    ///
    /// # Arguments
    /// * `identifier` - The login identifier (an email address for the bundled stores)
    ///
    /// # Returns
    /// * `Ok(Some(UserIdentity))` - User found
    /// * `Ok(None)` - No user with this identifier
    /// * `Err(DomainError::ServiceUnavailable)` - The directory could not be reached
    async fn find_by_identifier(&self, identifier: &str)
        -> Result<Option<UserIdentity>, DomainError>;

    /// Report whether a user is currently active
    ///
    /// # Returns
    /// * `Ok(Some(bool))` - Activity flag of the user
    /// * `Ok(None)` - No user with this identifier
    async fn is_active(&self, identifier: &str) -> Result<Option<bool>, DomainError> {
        Ok(self
            .find_by_identifier(identifier)
            .await?
            .map(|user| user.is_active))
    }
}

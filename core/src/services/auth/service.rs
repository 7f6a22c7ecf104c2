//! Login flow: credential check followed by token issuance

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::entities::token::TokenPair;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{CredentialStore, RevocationLedger};
use crate::services::token::TokenService;

use super::password::PasswordVerifier;

/// Hashed at construction and verified against when the identifier is unknown
const UNKNOWN_ACCOUNT_PASSWORD: &str = "tokenline-unknown-account";

/// Authentication service exchanging credentials for a token pair
pub struct AuthService<L, U, H>
where
    L: RevocationLedger,
    U: CredentialStore,
    H: PasswordVerifier,
{
    /// Credential store holding password hashes
    users: Arc<U>,
    /// Token service issuing the pair
    token_service: Arc<TokenService<L, U>>,
    /// Password hash verifier
    password_verifier: Arc<H>,
    /// Hash checked on the unknown-identifier path so both failures cost one verification
    unknown_account_hash: Option<String>,
}

impl<L, U, H> AuthService<L, U, H>
where
    L: RevocationLedger,
    U: CredentialStore,
    H: PasswordVerifier,
{
    /// Create a new authentication service
    ///
    /// Hashes a fixed password once, so a login for an unknown identifier
    /// performs the same verification work as a wrong password.
    ///
    /// # Arguments
    ///
    /// * `users` - Credential store used to look up password hashes
    /// * `token_service` - Service issuing token pairs
    /// * `password_verifier` - Verifier for stored password hashes
    pub fn new(
        users: Arc<U>,
        token_service: Arc<TokenService<L, U>>,
        password_verifier: Arc<H>,
    ) -> Self {
        let unknown_account_hash = match password_verifier.hash(UNKNOWN_ACCOUNT_PASSWORD) {
            Ok(hash) => Some(hash),
            Err(e) => {
                warn!("Could not prepare the unknown-account hash: {}", e);
                None
            }
        };

        Self {
            users,
            token_service,
            password_verifier,
            unknown_account_hash,
        }
    }

    /// The token service this login flow issues through
    pub fn token_service(&self) -> &Arc<TokenService<L, U>> {
        &self.token_service
    }

    /// Verify credentials and issue a token pair
    ///
    /// An unknown identifier and a wrong password produce the same
    /// `InvalidCredentials` error. A correct password on an inactive account
    /// produces `InactiveAccount`.
    ///
    /// # Arguments
    ///
    /// * `identifier` - Login identifier
    /// * `password` - Plaintext password
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Credentials accepted
    /// * `Err(DomainError)` - Authentication failed or a store was unavailable
    pub async fn login(&self, identifier: &str, password: &str) -> DomainResult<TokenPair> {
        let user = self.users.find_by_identifier(identifier).await?;

        let password_hash = match &user {
            Some(user) => Some(user.password_hash.clone()),
            None => self.unknown_account_hash.clone(),
        };
        let password_ok = match password_hash {
            Some(password_hash) => self.check_password(password, password_hash).await?,
            None => false,
        };

        let user = match user {
            Some(user) if password_ok => user,
            Some(_) => {
                warn!(subject = %identifier, reason = "invalid_credentials", "Login rejected");
                return Err(AuthError::InvalidCredentials.into());
            }
            None => {
                warn!(subject = %identifier, reason = "unknown_account", "Login rejected");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        let pair = self.token_service.issue_pair(&user.identifier).await?;
        info!(subject = %user.identifier, "Login succeeded");
        Ok(pair)
    }

    async fn check_password(&self, password: &str, password_hash: String) -> DomainResult<bool> {
        let verifier = self.password_verifier.clone();
        let password = password.to_string();

        tokio::task::spawn_blocking(move || verifier.verify(&password, &password_hash))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password verification task failed: {}", e),
            })?
    }
}

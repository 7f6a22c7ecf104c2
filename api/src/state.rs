//! Shared application state handed to every handler

use std::sync::Arc;

use tl_core::repositories::{CredentialStore, RevocationLedger};
use tl_core::services::{AuthService, PasswordVerifier, TokenService};

/// Services reachable from route handlers
pub struct AppState<L, U, H>
where
    L: RevocationLedger,
    U: CredentialStore,
    H: PasswordVerifier,
{
    pub auth_service: Arc<AuthService<L, U, H>>,
    pub token_service: Arc<TokenService<L, U>>,
}

impl<L, U, H> AppState<L, U, H>
where
    L: RevocationLedger,
    U: CredentialStore,
    H: PasswordVerifier,
{
    /// Build the state around a login service, sharing its token service
    pub fn new(auth_service: Arc<AuthService<L, U, H>>) -> Self {
        let token_service = auth_service.token_service().clone();
        Self {
            auth_service,
            token_service,
        }
    }
}

use actix_web::{web, HttpResponse};

use tl_core::errors::DomainError;
use tl_core::repositories::{CredentialStore, RevocationLedger};
use tl_core::services::PasswordVerifier;

use crate::dto::auth::TokenVerifyRequest;
use crate::handlers::error::handle_domain_error;
use crate::state::AppState;

/// Handler for POST /api/jwt/verify
///
/// Returns `200 {}` for a currently valid access token and the generic 401
/// otherwise. No store is consulted.
pub async fn verify_token<L, U, H>(
    state: web::Data<AppState<L, U, H>>,
    request: web::Json<TokenVerifyRequest>,
) -> HttpResponse
where
    L: RevocationLedger + 'static,
    U: CredentialStore + 'static,
    H: PasswordVerifier,
{
    match state.token_service.verify_access(&request.token) {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({})),
        Err(error) => handle_domain_error(&DomainError::Token(error)),
    }
}

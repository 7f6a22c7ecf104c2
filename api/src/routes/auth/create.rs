use actix_web::{web, HttpResponse};
use validator::Validate;

use tl_core::repositories::{CredentialStore, RevocationLedger};
use tl_core::services::PasswordVerifier;
use tl_shared::config::CookieConfig;

use crate::dto::auth::{TokenCreateRequest, TokenPairResponse};
use crate::handlers::cookies::set_token_cookies;
use crate::handlers::error::{handle_domain_error, validation_error};
use crate::state::AppState;

/// Handler for POST /api/jwt/create
///
/// # Request Body
///
/// ```json
/// { "identifier": "ada@example.com", "password": "..." }
/// ```
///
/// `email` is accepted in place of `identifier`.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "access": "eyJ...", "refresh": "eyJ..." }
/// ```
///
/// Both tokens are also set as HttpOnly cookies.
///
/// ## Errors
/// - 400 Bad Request: Missing or empty fields
/// - 401 Unauthorized: Unknown identifier, wrong password or inactive account
/// - 503 Service Unavailable: Credential store unreachable
pub async fn create_token<L, U, H>(
    state: web::Data<AppState<L, U, H>>,
    cookies: web::Data<CookieConfig>,
    request: web::Json<TokenCreateRequest>,
) -> HttpResponse
where
    L: RevocationLedger + 'static,
    U: CredentialStore + 'static,
    H: PasswordVerifier,
{
    if let Err(errors) = request.validate() {
        return validation_error(&errors);
    }

    match state
        .auth_service
        .login(&request.identifier, &request.password)
        .await
    {
        Ok(pair) => {
            let mut response = HttpResponse::Ok();
            set_token_cookies(&mut response, &cookies, &pair);
            response.json(TokenPairResponse::from(pair))
        }
        Err(error) => handle_domain_error(&error),
    }
}

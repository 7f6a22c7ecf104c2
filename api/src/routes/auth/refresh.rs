use actix_web::{web, HttpRequest, HttpResponse};

use tl_core::repositories::{CredentialStore, RevocationLedger};
use tl_core::services::PasswordVerifier;
use tl_shared::config::CookieConfig;

use crate::dto::auth::{TokenPairResponse, TokenRefreshRequest};
use crate::handlers::cookies::{presented_refresh_token, set_token_cookies};
use crate::handlers::error::{handle_domain_error, unauthorized};
use crate::state::AppState;

/// Handler for POST /api/jwt/refresh
///
/// Exchanges a refresh token for a new pair. The presented refresh token is
/// revoked and cannot be used again. The token is read from the body and,
/// when the body carries none, from the refresh cookie. The new pair is
/// returned in the body and as cookies.
///
/// ## Errors
/// - 401 Unauthorized: Missing, malformed, expired, revoked or wrong token type, or the account was deactivated
/// - 503 Service Unavailable: Revocation ledger unreachable
pub async fn refresh_token<L, U, H>(
    state: web::Data<AppState<L, U, H>>,
    cookies: web::Data<CookieConfig>,
    req: HttpRequest,
    request: Option<web::Json<TokenRefreshRequest>>,
) -> HttpResponse
where
    L: RevocationLedger + 'static,
    U: CredentialStore + 'static,
    H: PasswordVerifier,
{
    let body = request.and_then(|json| json.into_inner().refresh);
    let Some(token) = presented_refresh_token(body, &req, &cookies) else {
        tracing::warn!(reason = "missing_refresh_token", "Request rejected");
        return unauthorized();
    };

    match state.token_service.refresh(&token).await {
        Ok(pair) => {
            let mut response = HttpResponse::Ok();
            set_token_cookies(&mut response, &cookies, &pair);
            response.json(TokenPairResponse::from(pair))
        }
        Err(error) => handle_domain_error(&error),
    }
}

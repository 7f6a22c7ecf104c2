use actix_web::{web, HttpRequest, HttpResponse};

use tl_core::domain::entities::revocation::RevocationOutcome;
use tl_core::repositories::{CredentialStore, RevocationLedger};
use tl_core::services::PasswordVerifier;
use tl_shared::config::CookieConfig;

use crate::dto::auth::LogoutRequest;
use crate::handlers::cookies::{clear_token_cookies, presented_refresh_token};
use crate::handlers::error::{handle_domain_error, unauthorized};
use crate::state::AppState;

/// Handler for POST /api/logout
///
/// Revokes the presented refresh token, taken from the body or else from the
/// refresh cookie, and clears both token cookies. Repeating the call with
/// the same token succeeds as well. Access tokens already issued stay valid
/// until they expire.
///
/// ## Errors
/// - 401 Unauthorized: Missing or malformed token, or an access token
/// - 503 Service Unavailable: Revocation ledger unreachable
pub async fn logout<L, U, H>(
    state: web::Data<AppState<L, U, H>>,
    cookies: web::Data<CookieConfig>,
    req: HttpRequest,
    request: Option<web::Json<LogoutRequest>>,
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

    match state.token_service.revoke(&token).await {
        Ok(RevocationOutcome::Revoked) | Ok(RevocationOutcome::AlreadyRevoked) => {
            let mut response = HttpResponse::NoContent();
            clear_token_cookies(&mut response, &cookies);
            response.finish()
        }
        Err(error) => handle_domain_error(&error),
    }
}

use actix_web::HttpResponse;

use crate::dto::auth::ProfileResponse;
use crate::middleware::auth::AuthContext;

/// Handler for GET /api/users/me
///
/// Requires a valid access token; returns the token subject.
pub async fn me(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(ProfileResponse {
        identifier: auth.subject,
    })
}

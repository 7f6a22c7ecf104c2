//! Application factory
//!
//! Builds the actix-web `App` from the shared state so that the binary and
//! the integration tests serve exactly the same routes.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, HttpResponse,
};
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

use tl_core::repositories::{CredentialStore, RevocationLedger};
use tl_core::services::PasswordVerifier;
use tl_shared::config::{CookieConfig, CorsConfig, ServerConfig};
use tl_shared::{error_codes, ErrorResponse};

use crate::handlers::error::json_error_handler;
use crate::middleware::{create_cors, AccessTokenVerifier, JwtAuth};
use crate::routes::{auth, health, users};
use crate::state::AppState;

/// HTTP-facing settings read by the app factory
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub cors: CorsConfig,
    pub cookies: CookieConfig,
    pub max_payload_size: usize,
}

impl HttpSettings {
    pub fn new(server: &ServerConfig, cors: &CorsConfig) -> Self {
        Self {
            cors: cors.clone(),
            cookies: CookieConfig::default(),
            max_payload_size: server.max_payload_size,
        }
    }

    pub fn with_cookies(mut self, cookies: CookieConfig) -> Self {
        self.cookies = cookies;
        self
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self::new(&ServerConfig::default(), &CorsConfig::development())
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<L, U, H>(
    app_state: web::Data<AppState<L, U, H>>,
    settings: &HttpSettings,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    L: RevocationLedger + 'static,
    U: CredentialStore + 'static,
    H: PasswordVerifier,
{
    let verifier: Arc<dyn AccessTokenVerifier> = app_state.token_service.clone();

    let json_config = web::JsonConfig::default()
        .limit(settings.max_payload_size)
        .error_handler(json_error_handler);

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        .app_data(web::Data::new(settings.cookies.clone()))
        .wrap(create_cors(&settings.cors))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api")
                .service(
                    web::scope("/jwt")
                        .route("/create", web::post().to(auth::create_token::<L, U, H>))
                        .route("/refresh", web::post().to(auth::refresh_token::<L, U, H>))
                        .route("/verify", web::post().to(auth::verify_token::<L, U, H>)),
                )
                .route("/logout", web::post().to(auth::logout::<L, U, H>))
                .service(
                    web::scope("/users")
                        .wrap(
                            JwtAuth::new(verifier)
                                .with_access_cookie(settings.cookies.access_cookie_name.clone()),
                        )
                        .route("/me", web::get().to(users::me)),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}

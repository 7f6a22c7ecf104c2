//! Bearer token middleware for protected endpoints.
//!
//! Verifies the access token from the `Authorization` header, or from the
//! access cookie when one is configured, and injects an [`AuthContext`] into
//! the request. Verification is stateless: only the
//! signature, type and expiry are checked.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use tl_core::errors::TokenError;
use tl_core::repositories::{CredentialStore, RevocationLedger};
use tl_core::services::TokenService;

use crate::handlers::cookies::token_from_cookie;
use crate::handlers::error::unauthorized;

/// Identity of the caller, available to handlers behind [`JwtAuth`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    /// Subject of the verified access token
    pub subject: String,
}

/// Object-safe view of the access token check
pub trait AccessTokenVerifier: Send + Sync {
    fn verify_access(&self, token: &str) -> Result<String, TokenError>;
}

impl<L: RevocationLedger, U: CredentialStore> AccessTokenVerifier for TokenService<L, U> {
    fn verify_access(&self, token: &str) -> Result<String, TokenError> {
        TokenService::verify_access(self, token)
    }
}

/// JWT authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    verifier: Arc<dyn AccessTokenVerifier>,
    access_cookie: Option<Rc<str>>,
}

impl JwtAuth {
    pub fn new(verifier: Arc<dyn AccessTokenVerifier>) -> Self {
        Self {
            verifier,
            access_cookie: None,
        }
    }

    /// Accept the access token from the named cookie when no bearer header is sent
    pub fn with_access_cookie(mut self, name: impl Into<String>) -> Self {
        let name: String = name.into();
        self.access_cookie = Some(Rc::from(name));
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            verifier: self.verifier.clone(),
            access_cookie: self.access_cookie.clone(),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    verifier: Arc<dyn AccessTokenVerifier>,
    access_cookie: Option<Rc<str>>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let token = extract_bearer_token(&req).or_else(|| {
            self.access_cookie
                .as_deref()
                .and_then(|name| token_from_cookie(req.request(), name))
        });
        let verified = match token {
            Some(token) => self.verifier.verify_access(&token).map_err(|e| e.reason()),
            None => Err("missing_access_token"),
        };

        Box::pin(async move {
            match verified {
                Ok(subject) => {
                    req.extensions_mut().insert(AuthContext { subject });
                    let response = service.call(req).await?;
                    Ok(response.map_into_left_body())
                }
                Err(reason) => {
                    tracing::warn!(reason, path = %req.path(), "Access token authentication failed");
                    Ok(req.into_response(unauthorized()).map_into_right_body())
                }
            }
        })
    }
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result: Result<Self, Self::Error> = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| InternalError::from_response("authentication required", unauthorized()).into());

        ready(result)
    }
}

//! Mapping of domain errors to HTTP responses
//!
//! Every token or credential failure produces the same 401 body. The precise
//! reason is only written to the log.

use actix_web::{error::JsonPayloadError, HttpRequest, HttpResponse};
use validator::ValidationErrors;

use tl_core::errors::DomainError;
use tl_shared::{error_codes, ErrorResponse};

const AUTHENTICATION_FAILED_MESSAGE: &str = "Authentication failed";

/// The generic 401 body
pub fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse::new(
        error_codes::AUTHENTICATION_FAILED,
        AUTHENTICATION_FAILED_MESSAGE,
    ))
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    if error.is_authentication_failure() {
        tracing::warn!(reason = error.reason(), "Request rejected");
        return unauthorized();
    }

    match error {
        DomainError::ServiceUnavailable { message } => {
            tracing::error!(reason = error.reason(), %message, "Backing store unavailable");
            HttpResponse::ServiceUnavailable().json(ErrorResponse::new(
                error_codes::SERVICE_UNAVAILABLE,
                "Service temporarily unavailable",
            ))
        }
        _ => {
            tracing::error!(reason = error.reason(), error = %error, "Request failed");
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                error_codes::INTERNAL_ERROR,
                "An internal error occurred",
            ))
        }
    }
}

/// 400 response listing the fields that failed validation
pub fn validation_error(errors: &ValidationErrors) -> HttpResponse {
    let mut fields: Vec<&str> = errors.field_errors().keys().copied().collect();
    fields.sort_unstable();

    HttpResponse::BadRequest().json(
        ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request")
            .add_detail("fields", fields),
    )
}

/// Error handler for bodies that are not valid JSON for the target DTO
pub fn json_error_handler(error: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %error, "Rejected request body");
    let response = HttpResponse::BadRequest().json(ErrorResponse::new(
        error_codes::BAD_REQUEST,
        "Malformed request body",
    ));
    actix_web::error::InternalError::from_response(error, response).into()
}

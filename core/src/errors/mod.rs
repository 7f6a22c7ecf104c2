//! Domain-specific error types and error handling.

mod types;


pub use types::{AuthError, TokenError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Internal error: {message}")]
    Internal { message: String },

    /// A backing store (ledger or credential store) could not be reached
    #[error("Service unavailable: {message}")]
    ServiceUnavailable { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// True for every error a client sees as a plain authentication failure
    pub fn is_authentication_failure(&self) -> bool {
        match self {
            DomainError::Auth(_) => true,
            DomainError::Token(error) => !error.is_server_fault(),
            _ => false,
        }
    }

    /// Short label used as the `reason` field in logs
    pub fn reason(&self) -> &'static str {
        match self {
            DomainError::Internal { .. } => "internal",
            DomainError::ServiceUnavailable { .. } => "service_unavailable",
            DomainError::Auth(error) => error.reason(),
            DomainError::Token(error) => error.reason(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

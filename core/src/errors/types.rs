//! Error types for the token lifecycle
//!
//! Every variant here surfaces to clients as the same authentication failure.
//! The distinctions exist for logs and for callers inside the workspace.

use thiserror::Error;

use crate::domain::entities::token::TokenType;

/// Credential and account errors raised on the login and refresh paths
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account is not active")]
    InactiveAccount,

    #[error("Unknown account")]
    UnknownAccount,

    #[error("User has been deactivated")]
    UserDeactivated,
}

impl AuthError {
    /// Short label used as the `reason` field in logs
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::InactiveAccount => "inactive_account",
            AuthError::UnknownAccount => "unknown_account",
            AuthError::UserDeactivated => "user_deactivated",
        }
    }
}

/// Token decoding, validation and revocation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Not a structurally valid token
    #[error("Malformed token")]
    Malformed,

    /// Signature does not match any accepted key
    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token expired")]
    Expired,

    #[error("Expected {expected} token, got {actual}")]
    WrongType { expected: TokenType, actual: TokenType },

    #[error("Token revoked")]
    Revoked,

    #[error("Token signing failed: {message}")]
    SigningFailed { message: String },

    #[error("Key loading failed: {message}")]
    KeyLoadError { message: String },
}

impl TokenError {
    /// Short label used as the `reason` field in logs
    pub fn reason(&self) -> &'static str {
        match self {
            TokenError::Malformed => "malformed",
            TokenError::InvalidSignature => "invalid_signature",
            TokenError::Expired => "expired",
            TokenError::WrongType { .. } => "wrong_type",
            TokenError::Revoked => "revoked",
            TokenError::SigningFailed { .. } => "signing_failed",
            TokenError::KeyLoadError { .. } => "key_load_error",
        }
    }

    /// Errors that come from server-side key material rather than the presented token
    pub fn is_server_fault(&self) -> bool {
        matches!(
            self,
            TokenError::SigningFailed { .. } | TokenError::KeyLoadError { .. }
        )
    }
}

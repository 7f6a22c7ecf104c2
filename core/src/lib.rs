//! # Tokenline Core
//!
//! Domain layer of the token lifecycle service.
//! This crate contains the token and identity entities, the token codec and
//! lifecycle manager, the repository contracts for the revocation ledger and
//! the credential store, and the error taxonomy shared by every layer above.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{Claims, RevocationOutcome, TokenPair, TokenType, UserIdentity};
pub use errors::{AuthError, DomainError, DomainResult, TokenError};
pub use repositories::{CredentialStore, RevocationLedger};
pub use services::{AuthService, Clock, TokenCodec, TokenService};

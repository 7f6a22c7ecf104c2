//! Authentication service module
//!
//! Exchanges a login identifier and password for a token pair. Refresh,
//! verification and logout go straight to the token service.

mod password;
mod service;


pub use password::{BcryptVerifier, PasswordVerifier};
pub use service::AuthService;

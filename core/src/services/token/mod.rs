//! Token service module for JWT management
//!
//! This module handles all token-related operations including:
//! - Signing and verifying tokens against a `{current, previous}` key ring
//! - Issuing access/refresh pairs and rotating refresh tokens
//! - Logout through the revocation ledger
//! - Background purge of revocation entries that can no longer matter

mod cleanup;
mod codec;
mod config;
mod key_manager;
mod service;

#[cfg(test)]
mod tests;

pub use cleanup::{CleanupResult, LedgerCleanupConfig, LedgerCleanupService};
pub use codec::TokenCodec;
pub use config::TokenServiceConfig;
pub use key_manager::{key_id, SigningKeyRing};
pub use service::TokenService;

//! # Infrastructure Layer
//!
//! Concrete backends for the token lifecycle:
//! - **Ledger**: in-memory and Redis revocation ledgers
//! - **Database**: in-memory and MySQL credential stores
//! - **Cache**: Redis client with connection retry and backoff
//!
//! ## Features
//!
//! - `mysql`: Enable the MySQL credential store (default)
//! - `redis-cache`: Enable the Redis revocation ledger (default)

use tl_core::errors::DomainError;

/// Cache module - Redis client and operations
#[cfg(feature = "redis-cache")]
pub mod cache;

/// Credential stores
pub mod database;

/// Revocation ledgers
pub mod ledger;

pub use database::InMemoryCredentialStore;
pub use ledger::InMemoryRevocationLedger;

#[cfg(feature = "mysql")]
pub use database::{DatabasePool, MySqlCredentialStore};
#[cfg(feature = "redis-cache")]
pub use ledger::RedisRevocationLedger;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[cfg(feature = "mysql")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[cfg(feature = "redis-cache")]
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Config(message) => DomainError::Internal { message },
            other => DomainError::ServiceUnavailable {
                message: other.to_string(),
            },
        }
    }
}

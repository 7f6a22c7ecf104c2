//! Shared configuration and common types for the Tokenline server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types loaded once at startup
//! - Error response structure returned by the HTTP layer

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, CorsConfig, DatabaseConfig, Environment, JwtConfig,
    LedgerBackend, LedgerConfig, LoggingConfig, ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};

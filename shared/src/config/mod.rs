//! Configuration module with per-concern sub-modules
//!
//! - `auth` - JWT signing keys, token lifetimes and key rotation
//! - `cache` - Redis connection used by the revocation ledger
//! - `database` - MySQL connection used by the credential store
//! - `environment` - Environment detection and logging configuration
//! - `ledger` - Revocation ledger backend and purge schedule
//! - `server` - HTTP server and CORS configuration

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod ledger;
pub mod server;

use serde::{Deserialize, Serialize};

pub use auth::{AuthConfig, CookieConfig, JwtConfig, DEFAULT_DEVELOPMENT_SECRET, MAX_LIFETIME_SECONDS};
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use ledger::{LedgerBackend, LedgerConfig};
pub use server::{CorsConfig, ServerConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Revocation ledger configuration
    #[serde(default)]
    pub ledger: LedgerConfig,

    /// Redis configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Credential store database configuration, absent means in-memory store
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            ledger: LedgerConfig::default(),
            cache: CacheConfig::default(),
            database: None,
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        let mut logging = LoggingConfig::for_environment(environment);
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            logging.level = level;
        }

        Self {
            environment,
            server: ServerConfig::from_env(),
            auth: AuthConfig::from_env(),
            ledger: LedgerConfig::from_env(),
            cache: CacheConfig::from_env(),
            database: DatabaseConfig::from_env_optional(),
            cors: CorsConfig::from_env(environment),
            logging,
        }
    }

    /// Rejects configurations that must never reach production
    pub fn validate(&self) -> Result<(), String> {
        if self.environment.is_production() && self.auth.jwt.is_using_default_secret() {
            return Err("JWT_SECRET must be set in production".to_string());
        }
        if self.ledger.backend == LedgerBackend::Memory && self.environment.is_production() {
            return Err("the in-memory revocation ledger is not durable; use LEDGER_BACKEND=redis".to_string());
        }
        self.auth.jwt.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.database.is_none());
    }

    #[test]
    fn test_production_rejects_default_secret() {
        let config = AppConfig {
            environment: Environment::Production,
            ledger: LedgerConfig {
                backend: LedgerBackend::Redis,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_production_rejects_memory_ledger() {
        let mut config = AppConfig {
            environment: Environment::Production,
            ..Default::default()
        };
        config.auth.jwt = JwtConfig::new("a-real-production-secret");
        assert!(config.validate().is_err());

        config.ledger.backend = LedgerBackend::Redis;
        assert!(config.validate().is_ok());
    }
}

//! Revocation ledger configuration

use serde::{Deserialize, Serialize};

/// Storage backing the revocation ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerBackend {
    /// Process-local map, lost on restart
    #[default]
    Memory,
    /// Redis, shared between instances
    Redis,
}

impl std::str::FromStr for LedgerBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "in-memory" => Ok(LedgerBackend::Memory),
            "redis" => Ok(LedgerBackend::Redis),
            _ => Err(format!("Invalid ledger backend: {}", s)),
        }
    }
}

/// Revocation ledger configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LedgerConfig {
    /// Backend used to persist revoked token ids
    #[serde(default)]
    pub backend: LedgerBackend,

    /// Seconds between purge runs
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_secs: u64,

    /// Run the purge task in the background
    #[serde(default = "default_cleanup_enabled")]
    pub cleanup_enabled: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            backend: LedgerBackend::default(),
            cleanup_interval_secs: default_cleanup_interval(),
            cleanup_enabled: default_cleanup_enabled(),
        }
    }
}

impl LedgerConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let backend = std::env::var("LEDGER_BACKEND")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default();
        let cleanup_interval_secs = std::env::var("LEDGER_CLEANUP_INTERVAL")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_else(default_cleanup_interval);
        let cleanup_enabled = std::env::var("LEDGER_CLEANUP_ENABLED")
            .map(|value| value != "false" && value != "0")
            .unwrap_or(true);

        Self {
            backend,
            cleanup_interval_secs,
            cleanup_enabled,
        }
    }
}

fn default_cleanup_interval() -> u64 {
    3600 // 1 hour
}

fn default_cleanup_enabled() -> bool {
    true
}

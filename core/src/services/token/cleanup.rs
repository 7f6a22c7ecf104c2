//! Periodic purge of revocation ledger entries
//!
//! An entry only matters while the refresh token it names could still pass
//! the expiry check, so entries older than the refresh lifetime are dropped.

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::errors::DomainError;
use crate::repositories::{CredentialStore, RevocationLedger};

use super::service::TokenService;

/// Configuration for the ledger cleanup service
#[derive(Debug, Clone)]
pub struct LedgerCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for LedgerCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600,  // Run every hour
            enabled: true,
        }
    }
}

/// Service purging stale revocation entries
///
/// Retention and the time source come from the token service, so the purge
/// cutoff always matches the refresh lifetime tokens are issued with.
pub struct LedgerCleanupService<L, U>
where
    L: RevocationLedger + 'static,
    U: CredentialStore + 'static,
{
    token_service: Arc<TokenService<L, U>>,
    config: LedgerCleanupConfig,
}

impl<L, U> LedgerCleanupService<L, U>
where
    L: RevocationLedger + 'static,
    U: CredentialStore + 'static,
{
    /// Create a new ledger cleanup service
    pub fn new(token_service: Arc<TokenService<L, U>>, config: LedgerCleanupConfig) -> Self {
        Self {
            token_service,
            config,
        }
    }

    /// Run a single cleanup cycle
    ///
    /// Ledger failures are collected into the result rather than returned,
    /// so the background loop keeps running.
    pub async fn run_cleanup(&self) -> Result<CleanupResult, DomainError> {
        if !self.config.enabled {
            return Ok(CleanupResult::default());
        }

        let mut result = CleanupResult::default();

        match self.token_service.purge_revocations().await {
            Ok(count) => {
                result.entries_purged = count;
                info!(purged = count, "Revocation ledger cleanup completed");
            }
            Err(e) => {
                error!("Failed to purge revocation ledger: {}", e);
                result.errors.push(format!("Ledger purge error: {}", e));
            }
        }

        Ok(result)
    }

    /// Start the cleanup service as a background task
    ///
    /// This spawns a tokio task that runs cleanup at regular intervals
    pub fn start_background_task(self: Arc<Self>) {
        if !self.config.enabled {
            warn!("Revocation ledger cleanup is disabled");
            return;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds.max(1));

        tokio::spawn(async move {
            info!(
                "Revocation ledger cleanup started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                match self.run_cleanup().await {
                    Ok(result) => {
                        if !result.errors.is_empty() {
                            warn!("Cleanup completed with errors: {:?}", result.errors);
                        }
                    }
                    Err(e) => {
                        error!("Ledger cleanup cycle failed: {}", e);
                    }
                }
            }
        });
    }
}

/// Result of a cleanup operation
#[derive(Debug, Default)]
pub struct CleanupResult {
    /// Number of revocation entries removed
    pub entries_purged: usize,
    /// Any errors encountered during cleanup
    pub errors: Vec<String>,
}

impl CleanupResult {
    /// Check if the cleanup was successful (no errors)
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

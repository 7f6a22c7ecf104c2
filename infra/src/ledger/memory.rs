//! Process-local revocation ledger.
//!
//! Entries live as long as the process; a restart forgets every revocation.
//! Suitable for development and single-instance deployments only.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use tl_core::errors::DomainError;
use tl_core::repositories::RevocationLedger;

/// Revocation ledger held in a map behind an async read/write lock
#[derive(Default)]
pub struct InMemoryRevocationLedger {
    entries: RwLock<HashMap<String, DateTime<Utc>>>,
}

impl InMemoryRevocationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of revoked ids currently held
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl RevocationLedger for InMemoryRevocationLedger {
    async fn contains(&self, unique_id: &str) -> Result<bool, DomainError> {
        Ok(self.entries.read().await.contains_key(unique_id))
    }

    async fn add(&self, unique_id: &str, revoked_at: DateTime<Utc>) -> Result<bool, DomainError> {
        // Check and insert under one write guard
        let mut entries = self.entries.write().await;
        if entries.contains_key(unique_id) {
            return Ok(false);
        }
        entries.insert(unique_id.to_string(), revoked_at);
        Ok(true)
    }

    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, revoked_at| *revoked_at >= cutoff);
        let purged = before - entries.len();
        debug!(purged, remaining = entries.len(), "Purged in-memory revocation entries");
        Ok(purged)
    }
}

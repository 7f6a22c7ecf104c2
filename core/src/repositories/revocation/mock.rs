//! Mock implementation of RevocationLedger for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::DomainError;

use super::r#trait::RevocationLedger;

/// Mock revocation ledger for testing
#[derive(Clone)]
pub struct MockRevocationLedger {
    entries: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
    unavailable: Arc<AtomicBool>,
}

impl MockRevocationLedger {
    /// Create a new mock ledger
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            unavailable: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make every subsequent call fail with `ServiceUnavailable`
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of entries currently held
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::ServiceUnavailable {
                message: "mock ledger unavailable".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockRevocationLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RevocationLedger for MockRevocationLedger {
    async fn contains(&self, unique_id: &str) -> Result<bool, DomainError> {
        self.check_available()?;
        let entries = self.entries.read().await;
        Ok(entries.contains_key(unique_id))
    }

    async fn add(&self, unique_id: &str, revoked_at: DateTime<Utc>) -> Result<bool, DomainError> {
        self.check_available()?;
        let mut entries = self.entries.write().await;

        if entries.contains_key(unique_id) {
            return Ok(false);
        }

        entries.insert(unique_id.to_string(), revoked_at);
        Ok(true)
    }

    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize, DomainError> {
        self.check_available()?;
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, revoked_at| *revoked_at >= cutoff);
        Ok(before - entries.len())
    }
}

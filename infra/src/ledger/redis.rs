//! Redis-backed revocation ledger shared by every service instance.
//!
//! Each revoked id is stored as `revoked:{jti}` written with `SET NX EX`, so
//! insert-if-absent is a single atomic command. A sorted set
//! `revoked:index` scored by revocation time lets purges find old entries
//! without scanning the keyspace.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use tl_core::errors::DomainError;
use tl_core::repositories::RevocationLedger;

use crate::cache::RedisClient;

const ENTRY_PREFIX: &str = "revoked";
const INDEX_KEY: &str = "revoked:index";

/// Revocation ledger stored in Redis
pub struct RedisRevocationLedger {
    client: RedisClient,
    /// Expiry set on each entry key
    retention_seconds: u64,
}

impl RedisRevocationLedger {
    /// # Arguments
    /// * `client` - Connected Redis client
    /// * `refresh_ttl_seconds` - Refresh token lifetime
    pub fn new(client: RedisClient, refresh_ttl_seconds: u64) -> Self {
        Self {
            client,
            retention_seconds: entry_retention_seconds(refresh_ttl_seconds),
        }
    }

    fn entry_key(&self, unique_id: &str) -> String {
        self.client
            .make_key(&format!("{}:{}", ENTRY_PREFIX, unique_id))
    }

    fn index_key(&self) -> String {
        self.client.make_key(INDEX_KEY)
    }

    /// PING the backing Redis
    pub async fn health_check(&self) -> Result<bool, DomainError> {
        Ok(self.client.health_check().await?)
    }
}

/// Value stored under an entry key: revocation second plus a per-write nonce
pub(crate) fn entry_value(revoked_at: DateTime<Utc>) -> String {
    format!("{}:{}", revoked_at.timestamp(), Uuid::new_v4())
}

/// Entry keys outlive the refresh lifetime by one second
///
/// Expiry is checked in whole seconds, so a token passes until the end of
/// its `exp` second.
pub(crate) fn entry_retention_seconds(refresh_ttl_seconds: u64) -> u64 {
    refresh_ttl_seconds.max(1).saturating_add(1)
}

#[async_trait]
impl RevocationLedger for RedisRevocationLedger {
    async fn contains(&self, unique_id: &str) -> Result<bool, DomainError> {
        Ok(self.client.exists(&self.entry_key(unique_id)).await?)
    }

    async fn add(&self, unique_id: &str, revoked_at: DateTime<Utc>) -> Result<bool, DomainError> {
        let key = self.entry_key(unique_id);
        let inserted = self
            .client
            .set_if_absent_with_expiry(&key, &entry_value(revoked_at), self.retention_seconds)
            .await?;

        if inserted {
            self.client
                .zadd(&self.index_key(), unique_id, revoked_at.timestamp())
                .await?;
            debug!(jti = %unique_id, "Revocation recorded in Redis");
        }

        Ok(inserted)
    }

    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize, DomainError> {
        let index_key = self.index_key();
        // Scores are floored seconds: `score < floor(cutoff)` implies `revoked_at < cutoff`
        let stale = self
            .client
            .zrange_below(&index_key, cutoff.timestamp())
            .await?;

        if stale.is_empty() {
            return Ok(0);
        }

        let keys: Vec<String> = stale.iter().map(|id| self.entry_key(id)).collect();
        // Entry keys may already be gone through their own expiry
        self.client.delete_many(&keys).await?;
        let purged = self.client.zrem(&index_key, &stale).await?;

        info!(purged, "Purged Redis revocation entries");
        Ok(purged)
    }
}

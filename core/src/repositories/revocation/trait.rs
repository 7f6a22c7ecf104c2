//! Revocation ledger trait: the set of refresh token ids that may no longer be used.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::DomainError;

/// Durable set of revoked refresh token ids
///
/// Reads may run concurrently. `add` must be an atomic insert-if-absent so
/// that two concurrent rotations of one refresh token cannot both succeed.
///
/// # Errors
/// Storage failures are reported as `DomainError::ServiceUnavailable`.
#[async_trait]
pub trait RevocationLedger: Send + Sync {
    /// Check whether a token id has been revoked
    ///
    /// # Arguments
    /// * `unique_id` - The `jti` of the refresh token
    ///
    /// # Returns
    /// * `Ok(true)` - The id is in the ledger
    /// * `Ok(false)` - The id is unknown to the ledger
    async fn contains(&self, unique_id: &str) -> Result<bool, DomainError>;

    /// Insert a token id if it is not already present
    ///
    /// # Arguments
    /// * `unique_id` - The `jti` of the refresh token
    /// * `revoked_at` - Revocation instant, used by `purge_older_than`
    ///
    /// # Returns
    /// * `Ok(true)` - This call inserted the id
    /// * `Ok(false)` - The id was already present; the existing entry is untouched
    ///
    /// # Example
    /// ```no_run
    /// # use chrono::Utc;
    /// # use tl_core::repositories::RevocationLedger;
    /// # async fn example(ledger: &impl RevocationLedger) -> Result<(), Box<dyn std::error::Error>> {
    /// if ledger.add("8b1c2d3e", Utc::now()).await? {
    ///     println!("revoked");
    /// } else {
    ///     println!("already revoked");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn add(&self, unique_id: &str, revoked_at: DateTime<Utc>) -> Result<bool, DomainError>;

    /// Delete entries revoked strictly before `cutoff`
    ///
    /// Callers pass `now - refresh_ttl`: any token whose id is purged has
    /// already expired and is rejected on expiry alone.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of entries removed
    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize, DomainError>;
}

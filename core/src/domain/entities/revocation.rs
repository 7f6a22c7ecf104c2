//! Revocation ledger records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Earliest revocation instant a ledger must still hold at `now`
///
/// Expiry is checked in whole seconds, so a token issued at `t` passes until
/// the end of second `floor(t) + lifetime`. The cutoff is floored to a whole
/// second and held back one more second, which also absorbs up to a second
/// of clock skew between instances.
///
/// Returns `None` when the arithmetic leaves the representable range.
pub fn purge_cutoff(now: DateTime<Utc>, lifetime_seconds: i64) -> Option<DateTime<Utc>> {
    let seconds = now
        .timestamp()
        .checked_sub(lifetime_seconds)?
        .checked_sub(1)?;
    DateTime::from_timestamp(seconds, 0)
}

/// Outcome of a logout request. Both variants are successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevocationOutcome {
    /// The id was inserted by this call
    Revoked,
    /// The id was already present in the ledger
    AlreadyRevoked,
}

impl RevocationOutcome {
    pub fn from_inserted(inserted: bool) -> Self {
        if inserted {
            RevocationOutcome::Revoked
        } else {
            RevocationOutcome::AlreadyRevoked
        }
    }
}

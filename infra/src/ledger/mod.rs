//! Revocation ledger backends.

pub mod memory;
#[cfg(feature = "redis-cache")]
pub mod redis;

#[cfg(test)]
mod tests;

pub use memory::InMemoryRevocationLedger;
#[cfg(feature = "redis-cache")]
pub use self::redis::RedisRevocationLedger;

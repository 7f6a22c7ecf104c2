//! Credential stores: MySQL via SQLx and an in-memory directory.

#[cfg(feature = "mysql")]
pub mod connection;
pub mod memory;
#[cfg(feature = "mysql")]
pub mod mysql;

#[cfg(test)]
mod tests;

#[cfg(feature = "mysql")]
pub use connection::{DatabasePool, PoolStatistics};
pub use memory::InMemoryCredentialStore;
#[cfg(feature = "mysql")]
pub use mysql::MySqlCredentialStore;

//! MySQL-backed repositories

pub mod credential_store;

pub use credential_store::MySqlCredentialStore;

pub mod revocation;
pub mod user;

pub use revocation::RevocationLedger;
pub use user::CredentialStore;

#[cfg(test)]
pub use revocation::MockRevocationLedger;
#[cfg(test)]
pub use user::MockCredentialStore;

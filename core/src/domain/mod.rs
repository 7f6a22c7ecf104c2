//! Domain layer containing the token, identity and revocation entities.

pub mod entities;


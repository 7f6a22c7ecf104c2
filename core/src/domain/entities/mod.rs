//! Domain entities representing core business objects.

pub mod revocation;
pub mod token;
pub mod user;


// Re-export commonly used types
pub use revocation::{purge_cutoff, RevocationOutcome};
pub use token::{
    Claims, TokenPair, TokenType, DEFAULT_ACCESS_TOKEN_TTL_SECONDS,
    DEFAULT_REFRESH_TOKEN_TTL_SECONDS,
};
pub use user::UserIdentity;

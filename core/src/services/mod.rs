//! Business services containing domain logic and use cases.

pub mod auth;
pub mod clock;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, BcryptVerifier, PasswordVerifier};
pub use clock::{Clock, ManualClock, SystemClock};
pub use token::{
    CleanupResult, LedgerCleanupConfig, LedgerCleanupService, SigningKeyRing, TokenCodec,
    TokenService, TokenServiceConfig,
};

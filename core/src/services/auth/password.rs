//! Password hash verification

use crate::errors::DomainError;

/// Checks a plaintext password against a stored hash
pub trait PasswordVerifier: Send + Sync + 'static {
    /// Returns `Ok(false)` for a wrong password; errors are reserved for unusable hashes
    fn verify(&self, password: &str, password_hash: &str) -> Result<bool, DomainError>;

    /// Hashes a password for storage
    fn hash(&self, password: &str) -> Result<String, DomainError>;
}

/// bcrypt-backed verifier
#[derive(Debug, Clone, Copy)]
pub struct BcryptVerifier {
    cost: u32,
}

impl BcryptVerifier {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptVerifier {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordVerifier for BcryptVerifier {
    fn verify(&self, password: &str, password_hash: &str) -> Result<bool, DomainError> {
        bcrypt::verify(password, password_hash).map_err(|e| DomainError::Internal {
            message: format!("Unusable password hash: {}", e),
        })
    }

    fn hash(&self, password: &str) -> Result<String, DomainError> {
        bcrypt::hash(password, self.cost).map_err(|e| DomainError::Internal {
            message: format!("Password hashing failed: {}", e),
        })
    }
}

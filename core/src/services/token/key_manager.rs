//! Signing key ring: the current key plus the key retired by the last rotation

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use tl_shared::config::JwtConfig;

use crate::errors::{DomainError, TokenError};

/// Key used to sign new tokens
#[derive(Clone)]
struct CurrentKey {
    kid: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

/// Key that no longer signs but still verifies until the overlap window closes
#[derive(Clone)]
struct RetiredKey {
    kid: String,
    decoding_key: DecodingKey,
    retired_at: DateTime<Utc>,
}

/// Ordered `{current, previous}` key ring
///
/// The ring is immutable once built. Rotating means building a new ring
/// whose `previous` is the old `current`.
#[derive(Clone)]
pub struct SigningKeyRing {
    algorithm: Algorithm,
    current: CurrentKey,
    previous: Option<RetiredKey>,
    overlap_window: Duration,
}

impl std::fmt::Debug for SigningKeyRing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKeyRing")
            .field("algorithm", &self.algorithm)
            .field("current_kid", &self.current.kid)
            .field("previous_kid", &self.previous.as_ref().map(|key| &key.kid))
            .field("overlap_window", &self.overlap_window)
            .finish()
    }
}

/// Derive a key id from key material
///
/// The id is the first 16 hex characters of a SHA-256 digest, so the same key
/// always gets the same id across restarts and instances.
pub fn key_id(material: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"tokenline-kid:");
    hasher.update(material);
    let digest = hex::encode(hasher.finalize());
    digest[..16].to_string()
}

impl SigningKeyRing {
    /// Creates an HS256 ring from a shared secret
    pub fn hs256(secret: &str) -> Self {
        Self {
            algorithm: Algorithm::HS256,
            current: CurrentKey {
                kid: key_id(secret.as_bytes()),
                encoding_key: EncodingKey::from_secret(secret.as_bytes()),
                decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            },
            previous: None,
            overlap_window: Duration::zero(),
        }
    }

    /// Creates an RS256 ring from PEM-encoded key files
    ///
    /// # Arguments
    ///
    /// * `private_key_path` - Path to the PEM-encoded private key file
    /// * `public_key_path` - Path to the PEM-encoded public key file
    ///
    /// # Returns
    ///
    /// * `Ok(SigningKeyRing)` - Keys loaded successfully
    /// * `Err(DomainError)` - A file could not be read or parsed
    pub fn rs256_from_files<P: AsRef<Path>>(
        private_key_path: P,
        public_key_path: P,
    ) -> Result<Self, DomainError> {
        let private_key_pem = read_pem(private_key_path.as_ref(), "private")?;
        let public_key_pem = read_pem(public_key_path.as_ref(), "public")?;

        Self::rs256_from_pem(&private_key_pem, &public_key_pem)
    }

    /// Creates an RS256 ring from PEM bytes
    pub fn rs256_from_pem(private_key_pem: &[u8], public_key_pem: &[u8]) -> Result<Self, DomainError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_key_pem).map_err(|e| {
            DomainError::Token(TokenError::KeyLoadError {
                message: format!("Invalid private key format: {}", e),
            })
        })?;

        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem).map_err(|e| {
            DomainError::Token(TokenError::KeyLoadError {
                message: format!("Invalid public key format: {}", e),
            })
        })?;

        Ok(Self {
            algorithm: Algorithm::RS256,
            current: CurrentKey {
                kid: key_id(public_key_pem),
                encoding_key,
                decoding_key,
            },
            previous: None,
            overlap_window: Duration::zero(),
        })
    }

    /// Registers the HS256 secret retired by a rotation
    pub fn with_previous_secret(mut self, secret: &str, retired_at: DateTime<Utc>) -> Self {
        self.previous = Some(RetiredKey {
            kid: key_id(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            retired_at,
        });
        self
    }

    /// Registers the RS256 public key retired by a rotation
    pub fn with_previous_public_pem(
        mut self,
        public_key_pem: &[u8],
        retired_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem).map_err(|e| {
            DomainError::Token(TokenError::KeyLoadError {
                message: format!("Invalid previous public key format: {}", e),
            })
        })?;

        self.previous = Some(RetiredKey {
            kid: key_id(public_key_pem),
            decoding_key,
            retired_at,
        });
        Ok(self)
    }

    /// Sets how long the previous key keeps verifying after retirement
    pub fn with_overlap_window(mut self, window: Duration) -> Self {
        self.overlap_window = window;
        self
    }

    /// Builds the ring described by the JWT configuration
    ///
    /// A previous key without an explicit retirement time is considered
    /// retired at `started_at`.
    pub fn from_config(config: &JwtConfig, started_at: DateTime<Utc>) -> Result<Self, DomainError> {
        let retired_at = config
            .previous_retired_at
            .and_then(|seconds| DateTime::from_timestamp(seconds, 0))
            .unwrap_or(started_at);

        let ring = if config.is_rs256() {
            let private_key_path = config.private_key_path.as_deref().ok_or_else(|| {
                DomainError::Token(TokenError::KeyLoadError {
                    message: "RS256 requires JWT_PRIVATE_KEY_PATH".to_string(),
                })
            })?;
            let public_key_path = config.public_key_path.as_deref().ok_or_else(|| {
                DomainError::Token(TokenError::KeyLoadError {
                    message: "RS256 requires JWT_PUBLIC_KEY_PATH".to_string(),
                })
            })?;

            let ring = Self::rs256_from_files(private_key_path, public_key_path)?;
            match config.previous_public_key_path.as_deref() {
                Some(path) => {
                    let pem = read_pem(Path::new(path), "previous public")?;
                    ring.with_previous_public_pem(&pem, retired_at)?
                }
                None => ring,
            }
        } else {
            let ring = Self::hs256(&config.secret);
            match config.previous_secret.as_deref() {
                Some(secret) => ring.with_previous_secret(secret, retired_at),
                None => ring,
            }
        };

        let overlap_window = Duration::try_seconds(config.key_overlap_window).ok_or_else(|| {
            DomainError::Token(TokenError::KeyLoadError {
                message: "Key overlap window out of range".to_string(),
            })
        })?;

        Ok(ring.with_overlap_window(overlap_window))
    }

    /// Signing algorithm shared by both keys
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Id of the key that signs new tokens
    pub fn current_kid(&self) -> &str {
        &self.current.kid
    }

    /// Id of the retired key, if any
    pub fn previous_kid(&self) -> Option<&str> {
        self.previous.as_ref().map(|key| key.kid.as_str())
    }

    /// Returns the encoding key for signing JWTs
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.current.encoding_key
    }

    /// Selects the key that must verify a token carrying `kid`
    ///
    /// A token without `kid` is checked against the current key. The previous
    /// key is accepted while `now <= retired_at + overlap_window`.
    ///
    /// # Returns
    ///
    /// * `Ok(&DecodingKey)` - Key to verify the signature with
    /// * `Err(TokenError::InvalidSignature)` - Unknown key, or retired key past its window
    pub fn decoding_key_for(
        &self,
        kid: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<&DecodingKey, TokenError> {
        let kid = match kid {
            None => return Ok(&self.current.decoding_key),
            Some(kid) => kid,
        };

        if kid == self.current.kid {
            return Ok(&self.current.decoding_key);
        }

        match &self.previous {
            Some(previous) if previous.kid == kid => {
                // A window ending past the representable range never closes
                let open = previous
                    .retired_at
                    .checked_add_signed(self.overlap_window)
                    .map_or(true, |closes_at| now <= closes_at);
                if open {
                    Ok(&previous.decoding_key)
                } else {
                    Err(TokenError::InvalidSignature)
                }
            }
            _ => Err(TokenError::InvalidSignature),
        }
    }
}

fn read_pem(path: &Path, label: &str) -> Result<Vec<u8>, DomainError> {
    fs::read(path).map_err(|e| {
        DomainError::Token(TokenError::KeyLoadError {
            message: format!("Failed to read {} key {}: {}", label, path.display(), e),
        })
    })
}

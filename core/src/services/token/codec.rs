//! JWT encoding and decoding against the signing key ring

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, encode, Header, Validation};

use crate::domain::entities::token::Claims;
use crate::errors::TokenError;

use super::key_manager::SigningKeyRing;

/// Stateless token codec
///
/// Only signature and structure are checked here. Expiry and token type are
/// decided by the lifecycle manager against its own clock.
#[derive(Debug, Clone)]
pub struct TokenCodec {
    keys: SigningKeyRing,
    validation: Validation,
}

impl TokenCodec {
    /// Creates a codec bound to a key ring
    ///
    /// # Arguments
    ///
    /// * `keys` - Current and previous signing keys
    /// * `issuer` - Expected `iss` claim
    /// * `audience` - Expected `aud` claim; tokens are not audience-checked when `None`
    pub fn new(keys: SigningKeyRing, issuer: &str, audience: Option<&str>) -> Self {
        let mut validation = Validation::new(keys.algorithm());
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;
        validation.set_issuer(&[issuer]);
        match audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Self { keys, validation }
    }

    /// Signs claims with the current key
    ///
    /// The header names the signing key in `kid`.
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        let mut header = Header::new(self.keys.algorithm());
        header.kid = Some(self.keys.current_kid().to_string());

        encode(&header, claims, self.keys.encoding_key()).map_err(|e| TokenError::SigningFailed {
            message: e.to_string(),
        })
    }

    /// Verifies a token's signature and returns its claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Signature valid under the current key, or under the
    ///   previous key inside its overlap window
    /// * `Err(TokenError::Malformed)` - Not a well-formed token
    /// * `Err(TokenError::InvalidSignature)` - Signature, key or issuer rejected
    pub fn decode(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let header = decode_header(token).map_err(|_| TokenError::Malformed)?;

        if header.alg != self.keys.algorithm() {
            return Err(TokenError::InvalidSignature);
        }

        let key = self.keys.decoding_key_for(header.kid.as_deref(), now)?;

        decode::<Claims>(token, key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature
                | ErrorKind::InvalidAlgorithm
                | ErrorKind::InvalidIssuer
                | ErrorKind::InvalidAudience => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            })
    }

    /// The key ring this codec signs with
    pub fn keys(&self) -> &SigningKeyRing {
        &self.keys
    }
}

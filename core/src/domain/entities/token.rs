//! Token entities for JWT-based authentication.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default access token lifetime (5 minutes)
pub const DEFAULT_ACCESS_TOKEN_TTL_SECONDS: i64 = 5 * 60;

/// Default refresh token lifetime (24 hours)
pub const DEFAULT_REFRESH_TOKEN_TTL_SECONDS: i64 = 24 * 60 * 60;

/// Kind of credential a token represents. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Short-lived token presented on protected calls
    Access,
    /// Long-lived token exchanged for a new pair
    Refresh,
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenType::Access => write!(f, "access"),
            TokenType::Refresh => write!(f, "refresh"),
        }
    }
}

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Access or refresh
    pub token_type: TokenType,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,

    /// JWT ID, the unique identifier recorded by the revocation ledger
    pub jti: String,
}

impl Claims {
    /// Creates claims for a new token with a fresh `jti`
    ///
    /// # Arguments
    ///
    /// * `subject` - The user identifier the token is issued to
    /// * `token_type` - Access or refresh
    /// * `issued_at` - Issuance instant, taken from the service clock
    /// * `ttl_seconds` - Lifetime of the token, must be positive
    /// * `issuer` - Value of the `iss` claim
    /// * `audience` - Optional value of the `aud` claim
    pub fn new(
        subject: impl Into<String>,
        token_type: TokenType,
        issued_at: DateTime<Utc>,
        ttl_seconds: i64,
        issuer: impl Into<String>,
        audience: Option<String>,
    ) -> Self {
        let iat = issued_at.timestamp();

        Self {
            sub: subject.into(),
            token_type,
            iat,
            exp: iat.saturating_add(ttl_seconds),
            nbf: issued_at.timestamp(),
            iss: issuer.into(),
            aud: audience,
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Checks whether the token has expired at `now`
    ///
    /// A token is still valid during the second named by `exp`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() > self.exp
    }

    /// Lifetime the token was issued with, in seconds
    pub fn lifetime_seconds(&self) -> i64 {
        self.exp - self.iat
    }

    /// Expiration as a `DateTime`
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub access_expires_in: i64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_expires_in: i64,
        refresh_expires_in: i64,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in,
            refresh_expires_in,
        }
    }
}

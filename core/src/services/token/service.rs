//! Token lifecycle manager: issuance, verification, rotation and revocation

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::entities::revocation::{purge_cutoff, RevocationOutcome};
use crate::domain::entities::token::{Claims, TokenPair, TokenType};
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::{CredentialStore, RevocationLedger};
use crate::services::clock::{Clock, SystemClock};

use super::codec::TokenCodec;
use super::config::TokenServiceConfig;

/// Service issuing and rotating access/refresh token pairs
///
/// Access tokens are verified without touching any store. Refresh tokens are
/// single-use: rotating one records its id in the revocation ledger.
pub struct TokenService<L: RevocationLedger, U: CredentialStore> {
    ledger: Arc<L>,
    users: Arc<U>,
    codec: TokenCodec,
    config: TokenServiceConfig,
    clock: Arc<dyn Clock>,
}

impl<L: RevocationLedger, U: CredentialStore> TokenService<L, U> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `ledger` - Revocation ledger consulted on refresh and logout
    /// * `users` - Credential store consulted for account activity
    /// * `codec` - Token codec bound to the signing key ring
    /// * `config` - Token lifetimes and registered claims
    pub fn new(
        ledger: Arc<L>,
        users: Arc<U>,
        codec: TokenCodec,
        config: TokenServiceConfig,
    ) -> Self {
        Self {
            ledger,
            users,
            codec,
            config,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Token lifetimes and registered claims
    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Current instant according to the service clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Issues a fresh access/refresh pair for an active account
    ///
    /// # Arguments
    ///
    /// * `identifier` - The subject the pair is issued to
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Both tokens, each with a fresh `jti`
    /// * `Err(AuthError::UnknownAccount)` - The credential store has no such user
    /// * `Err(AuthError::InactiveAccount)` - The user is not active
    pub async fn issue_pair(&self, identifier: &str) -> DomainResult<TokenPair> {
        let user = self
            .users
            .find_by_identifier(identifier)
            .await?
            .ok_or(AuthError::UnknownAccount)?;

        if !user.is_active {
            warn!(subject = %identifier, reason = "inactive_account", "Refusing to issue tokens");
            return Err(AuthError::InactiveAccount.into());
        }

        let pair = self.mint_pair(&user.identifier)?;
        info!(subject = %user.identifier, "Issued token pair");
        Ok(pair)
    }

    /// Verifies an access token and returns its subject
    ///
    /// Never consults the revocation ledger: an access token stays valid until
    /// it expires.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The subject identifier
    /// * `Err(TokenError)` - `Malformed`, `InvalidSignature`, `WrongType` or `Expired`
    pub fn verify_access(&self, token: &str) -> Result<String, TokenError> {
        let now = self.clock.now();
        let claims = self.codec.decode(token, now)?;

        expect_type(&claims, TokenType::Access)?;
        if claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }

        Ok(claims.sub)
    }

    /// Exchanges a refresh token for a new pair
    ///
    /// The presented token's id is inserted into the ledger before the new
    /// pair is issued, so each refresh token rotates at most once. Of two
    /// concurrent refreshes of the same token exactly one succeeds; the other
    /// observes `Revoked`.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - The replacement pair
    /// * `Err(TokenError)` - `Malformed`, `InvalidSignature`, `WrongType`, `Expired` or `Revoked`
    /// * `Err(AuthError::UserDeactivated)` - The subject is no longer active
    /// * `Err(DomainError::ServiceUnavailable)` - Ledger or credential store unreachable
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        let now = self.clock.now();
        let claims = self.codec.decode(refresh_token, now)?;

        expect_type(&claims, TokenType::Refresh)?;
        if claims.is_expired_at(now) {
            return Err(TokenError::Expired.into());
        }

        if self.ledger.contains(&claims.jti).await? {
            warn!(jti = %claims.jti, subject = %claims.sub, reason = "revoked", "Refresh token reuse rejected");
            return Err(TokenError::Revoked.into());
        }

        match self.users.is_active(&claims.sub).await? {
            Some(true) => {}
            Some(false) | None => {
                warn!(subject = %claims.sub, reason = "user_deactivated", "Refresh rejected");
                return Err(AuthError::UserDeactivated.into());
            }
        }

        if !self.ledger.add(&claims.jti, now).await? {
            warn!(jti = %claims.jti, subject = %claims.sub, reason = "revoked", "Lost refresh rotation race");
            return Err(TokenError::Revoked.into());
        }

        let pair = self.mint_pair(&claims.sub)?;
        info!(jti = %claims.jti, subject = %claims.sub, "Rotated refresh token");
        Ok(pair)
    }

    /// Revokes a refresh token (logout)
    ///
    /// Expired tokens may still be revoked. Revoking a token twice succeeds
    /// both times.
    ///
    /// # Returns
    ///
    /// * `Ok(RevocationOutcome)` - `Revoked` on first use, `AlreadyRevoked` afterwards
    /// * `Err(TokenError)` - `Malformed`, `InvalidSignature` or `WrongType`
    pub async fn revoke(&self, refresh_token: &str) -> DomainResult<RevocationOutcome> {
        let now = self.clock.now();
        let claims = self.codec.decode(refresh_token, now)?;

        expect_type(&claims, TokenType::Refresh)?;

        let outcome = RevocationOutcome::from_inserted(self.ledger.add(&claims.jti, now).await?);
        match outcome {
            RevocationOutcome::Revoked => {
                info!(jti = %claims.jti, subject = %claims.sub, "Refresh token revoked");
            }
            RevocationOutcome::AlreadyRevoked => {
                debug!(jti = %claims.jti, reason = "already_revoked", "Refresh token was already revoked");
            }
        }

        Ok(outcome)
    }

    /// Removes ledger entries older than the refresh token lifetime
    ///
    /// Any token whose entry is removed already fails the expiry check, so
    /// dropping the entry cannot make it usable again.
    pub async fn purge_revocations(&self) -> DomainResult<usize> {
        let now = self.clock.now();
        let cutoff = purge_cutoff(now, self.config.refresh_ttl_seconds).ok_or_else(|| {
            DomainError::Internal {
                message: "Revocation purge cutoff out of range".to_string(),
            }
        })?;

        let purged = self.ledger.purge_older_than(cutoff).await?;
        debug!(purged, cutoff = %cutoff, "Purged revocation ledger");
        Ok(purged)
    }

    fn mint_pair(&self, subject: &str) -> DomainResult<TokenPair> {
        let now = self.clock.now();

        let access = self.mint(subject, TokenType::Access, now, self.config.access_ttl_seconds)?;
        let refresh = self.mint(subject, TokenType::Refresh, now, self.config.refresh_ttl_seconds)?;

        Ok(TokenPair::new(
            access,
            refresh,
            self.config.access_ttl_seconds,
            self.config.refresh_ttl_seconds,
        ))
    }

    fn mint(
        &self,
        subject: &str,
        token_type: TokenType,
        now: DateTime<Utc>,
        ttl_seconds: i64,
    ) -> DomainResult<String> {
        let claims = Claims::new(
            subject,
            token_type,
            now,
            ttl_seconds,
            self.config.issuer.as_str(),
            self.config.audience.clone(),
        );

        self.codec.encode(&claims).map_err(DomainError::from)
    }
}

fn expect_type(claims: &Claims, expected: TokenType) -> Result<(), TokenError> {
    if claims.token_type != expected {
        return Err(TokenError::WrongType {
            expected,
            actual: claims.token_type,
        });
    }
    Ok(())
}

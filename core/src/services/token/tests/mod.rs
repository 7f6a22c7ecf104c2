//! Tests for the token codec, lifecycle manager and ledger cleanup

mod codec_tests;

use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;

use crate::domain::entities::user::UserIdentity;
use crate::repositories::{MockCredentialStore, MockRevocationLedger};
use crate::services::clock::ManualClock;
use crate::services::token::{SigningKeyRing, TokenCodec, TokenService, TokenServiceConfig};

pub(super) const SECRET: &str = "test-secret-for-token-service";
pub(super) const ISSUER: &str = "tokenline";

pub(super) fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
}

pub(super) fn hs256_codec(secret: &str) -> TokenCodec {
    TokenCodec::new(SigningKeyRing::hs256(secret), ISSUER, None)
}

pub(super) struct Fixture {
    pub service: Arc<TokenService<MockRevocationLedger, MockCredentialStore>>,
    pub ledger: Arc<MockRevocationLedger>,
    pub users: Arc<MockCredentialStore>,
    pub clock: Arc<ManualClock>,
    pub codec: TokenCodec,
}

/// Service with default lifetimes, a manual clock and one active user "u1"
pub(super) async fn fixture() -> Fixture {
    let ledger = Arc::new(MockRevocationLedger::new());
    let users = Arc::new(MockCredentialStore::new());
    let clock = Arc::new(ManualClock::new(start_time()));

    let mut user = UserIdentity::new("u1", "unused-hash");
    user.activate();
    users.insert(user).await;

    let codec = hs256_codec(SECRET);
    let service = Arc::new(
        TokenService::new(
            ledger.clone(),
            users.clone(),
            codec.clone(),
            TokenServiceConfig::default(),
        )
        .with_clock(clock.clone()),
    );

    Fixture {
        service,
        ledger,
        users,
        clock,
        codec,
    }
}

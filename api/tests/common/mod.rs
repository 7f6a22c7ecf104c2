//! Shared fixtures for the HTTP integration tests
#![allow(dead_code)]

use actix_web::{test, web};
use chrono::{TimeZone, Utc};
use std::sync::Arc;

use tl_api::state::AppState;
use tl_core::services::{
    AuthService, BcryptVerifier, ManualClock, PasswordVerifier, SigningKeyRing, TokenCodec,
    TokenService, TokenServiceConfig,
};
use tl_infra::{InMemoryCredentialStore, InMemoryRevocationLedger};

pub const ACTIVE_USER: &str = "ada@example.com";
pub const INACTIVE_USER: &str = "sleeper@example.com";
pub const PASSWORD: &str = "correct horse battery staple";

pub type TestState = AppState<InMemoryRevocationLedger, InMemoryCredentialStore, BcryptVerifier>;

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub users: Arc<InMemoryCredentialStore>,
    pub ledger: Arc<InMemoryRevocationLedger>,
    pub clock: Arc<ManualClock>,
}

pub async fn context() -> TestContext {
    let verifier = Arc::new(BcryptVerifier::new(4));
    let password_hash = verifier.hash(PASSWORD).unwrap();

    let users = Arc::new(InMemoryCredentialStore::new());
    users.register(ACTIVE_USER, &password_hash).await;
    users.activate(ACTIVE_USER).await;
    users.register(INACTIVE_USER, &password_hash).await;

    let ledger = Arc::new(InMemoryRevocationLedger::new());
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
    ));

    let codec = TokenCodec::new(SigningKeyRing::hs256("integration-test-secret"), "tokenline", None);
    let token_service = Arc::new(
        TokenService::new(
            ledger.clone(),
            users.clone(),
            codec,
            TokenServiceConfig::default(),
        )
        .with_clock(clock.clone()),
    );
    let auth_service = Arc::new(AuthService::new(users.clone(), token_service, verifier));

    TestContext {
        state: web::Data::new(AppState::new(auth_service)),
        users,
        ledger,
        clock,
    }
}

pub fn post_json(uri: &str, body: serde_json::Value) -> test::TestRequest {
    test::TestRequest::post().uri(uri).set_json(body)
}

//! Integration tests for logout endpoint

mod common;

use actix_web::{http::StatusCode, test};
use chrono::Duration;
use serde_json::json;

use tl_api::app::{create_app, HttpSettings};

use common::{context, post_json, ACTIVE_USER};

#[actix_web::test]
async fn test_logout_is_idempotent() {
    let ctx = context().await;
    let app = test::init_service(create_app(ctx.state.clone(), &HttpSettings::default())).await;
    let pair = ctx.state.token_service.issue_pair(ACTIVE_USER).await.unwrap();

    for _ in 0..2 {
        let resp = test::call_service(
            &app,
            post_json("/api/logout", json!({"refresh": pair.refresh_token})).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }
    assert_eq!(ctx.ledger.len().await, 1);

    let resp = test::call_service(
        &app,
        post_json("/api/jwt/refresh", json!({"refresh": pair.refresh_token})).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_access_token_outlives_logout() {
    let ctx = context().await;
    let app = test::init_service(create_app(ctx.state.clone(), &HttpSettings::default())).await;
    let pair = ctx.state.token_service.issue_pair(ACTIVE_USER).await.unwrap();

    let resp = test::call_service(
        &app,
        post_json("/api/logout", json!({"refresh": pair.refresh_token})).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = test::call_service(
        &app,
        post_json("/api/jwt/verify", json!({"token": pair.access_token})).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_logout_with_expired_refresh_token_succeeds() {
    let ctx = context().await;
    let app = test::init_service(create_app(ctx.state.clone(), &HttpSettings::default())).await;
    let pair = ctx.state.token_service.issue_pair(ACTIVE_USER).await.unwrap();

    ctx.clock.advance(Duration::days(2));

    let resp = test::call_service(
        &app,
        post_json("/api/logout", json!({"refresh": pair.refresh_token})).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn test_logout_rejects_access_token_and_garbage() {
    let ctx = context().await;
    let app = test::init_service(create_app(ctx.state.clone(), &HttpSettings::default())).await;
    let pair = ctx.state.token_service.issue_pair(ACTIVE_USER).await.unwrap();

    for token in [pair.access_token.as_str(), "garbage"] {
        let resp = test::call_service(
            &app,
            post_json("/api/logout", json!({"refresh": token})).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
    assert_eq!(ctx.ledger.len().await, 0);
}

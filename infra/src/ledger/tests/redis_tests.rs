//! Redis ledger tests; they need a running Redis and are ignored by default

use chrono::{Duration, Utc};
use std::sync::Arc;

use tl_core::repositories::RevocationLedger;
use tl_shared::config::CacheConfig;

use crate::cache::RedisClient;
use crate::ledger::redis::{entry_retention_seconds, entry_value};
use crate::ledger::RedisRevocationLedger;

async fn ledger() -> RedisRevocationLedger {
    let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
    let prefix = format!("tl-test-{}", uuid::Uuid::new_v4());
    let client = RedisClient::new(CacheConfig::new(url).with_prefix(prefix))
        .await
        .unwrap();
    RedisRevocationLedger::new(client, 3600)
}

#[test]
fn test_entry_keys_outlive_the_refresh_lifetime() {
    assert_eq!(entry_retention_seconds(86400), 86401);
    assert_eq!(entry_retention_seconds(0), 2);
    assert_eq!(entry_retention_seconds(u64::MAX), u64::MAX);
}

#[test]
fn test_entry_values_are_unique_per_write() {
    let revoked_at = Utc::now();
    let first = entry_value(revoked_at);
    let second = entry_value(revoked_at);

    assert_ne!(first, second);
    assert!(first.starts_with(&format!("{}:", revoked_at.timestamp())));
}

#[tokio::test]
#[ignore] // Requires a running Redis
async fn test_redis_repeated_write_of_same_value_counts_as_insert() {
    let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
    let prefix = format!("tl-test-{}", uuid::Uuid::new_v4());
    let client = RedisClient::new(CacheConfig::new(url).with_prefix(prefix))
        .await
        .unwrap();
    let key = client.make_key("revoked:jti-retry");

    assert!(client.set_if_absent_with_expiry(&key, "100:a", 60).await.unwrap());
    // Same call retried after a lost reply
    assert!(client.set_if_absent_with_expiry(&key, "100:a", 60).await.unwrap());
    // A different writer
    assert!(!client.set_if_absent_with_expiry(&key, "100:b", 60).await.unwrap());
}

#[tokio::test]
#[ignore] // Requires a running Redis
async fn test_redis_add_is_insert_if_absent() {
    let ledger = ledger().await;

    assert!(ledger.add("jti-1", Utc::now()).await.unwrap());
    assert!(!ledger.add("jti-1", Utc::now()).await.unwrap());
    assert!(ledger.contains("jti-1").await.unwrap());
    assert!(!ledger.contains("jti-2").await.unwrap());
}

#[tokio::test]
#[ignore] // Requires a running Redis
async fn test_redis_purge_removes_old_entries() {
    let ledger = ledger().await;
    let now = Utc::now();

    ledger.add("old", now - Duration::hours(2)).await.unwrap();
    ledger.add("new", now).await.unwrap();

    assert_eq!(ledger.purge_older_than(now - Duration::hours(1)).await.unwrap(), 1);
    assert!(!ledger.contains("old").await.unwrap());
    assert!(ledger.contains("new").await.unwrap());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore] // Requires a running Redis
async fn test_redis_concurrent_adds_have_one_winner() {
    let ledger = Arc::new(ledger().await);
    let now = Utc::now();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let ledger = ledger.clone();
            tokio::spawn(async move { ledger.add("contended", now).await.unwrap() })
        })
        .collect();

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);
}

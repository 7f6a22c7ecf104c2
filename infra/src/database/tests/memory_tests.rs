//! Tests for the in-memory credential store

use tl_core::repositories::CredentialStore;

use crate::database::InMemoryCredentialStore;

#[tokio::test]
async fn test_registered_user_starts_inactive() {
    let store = InMemoryCredentialStore::new();
    store.register("ada@example.com", "$2b$04$hash").await;

    let user = store.find_by_identifier("ada@example.com").await.unwrap().unwrap();
    assert!(!user.is_active);
    assert_eq!(store.is_active("ada@example.com").await.unwrap(), Some(false));
}

#[tokio::test]
async fn test_activate_and_deactivate() {
    let store = InMemoryCredentialStore::new();
    store.register("ada@example.com", "$2b$04$hash").await;

    assert!(store.activate("ada@example.com").await);
    assert_eq!(store.is_active("ada@example.com").await.unwrap(), Some(true));

    assert!(store.deactivate("ada@example.com").await);
    assert_eq!(store.is_active("ada@example.com").await.unwrap(), Some(false));
}

#[tokio::test]
async fn test_unknown_identifier() {
    let store = InMemoryCredentialStore::new();

    assert!(store.find_by_identifier("ghost").await.unwrap().is_none());
    assert_eq!(store.is_active("ghost").await.unwrap(), None);
    assert!(!store.activate("ghost").await);
}

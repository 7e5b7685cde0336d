//! Unit tests for the revocation store

use std::sync::Arc;
use std::thread;

use super::{InMemoryRevocationStore, RevocationStore};

#[test]
fn test_new_store_is_empty() {
    let store = InMemoryRevocationStore::new();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
    assert!(!store.is_revoked("anything"));
}

#[test]
fn test_revoke_marks_only_that_token() {
    let store = InMemoryRevocationStore::new();
    store.revoke("token-a");

    assert!(store.is_revoked("token-a"));
    assert!(!store.is_revoked("token-b"));
    assert!(!store.is_revoked("token-a "));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_revoke_is_idempotent() {
    let store = InMemoryRevocationStore::new();
    store.revoke("token-a");
    store.revoke("token-a");

    assert_eq!(store.len(), 1);
    assert!(store.is_revoked("token-a"));
}

#[test]
fn test_revoke_many() {
    let store = InMemoryRevocationStore::new();
    store.revoke_many(["one", "two"]);
    store.revoke_many(vec![String::from("three")]);

    assert!(store.is_revoked("one"));
    assert!(store.is_revoked("two"));
    assert!(store.is_revoked("three"));
    assert!(!store.is_revoked("four"));
    assert_eq!(store.len(), 3);
}

#[test]
fn test_independent_stores_do_not_share_state() {
    let first = InMemoryRevocationStore::new();
    let second = InMemoryRevocationStore::new();

    first.revoke("shared-token");

    assert!(first.is_revoked("shared-token"));
    assert!(!second.is_revoked("shared-token"));
}

#[test]
fn test_arc_store_shares_state() {
    let store = Arc::new(InMemoryRevocationStore::new());
    let handle = Arc::clone(&store);

    handle.revoke("token");

    assert!(store.is_revoked("token"));
    assert!(RevocationStore::is_revoked(&handle, "token"));
}

#[test]
fn test_dyn_store() {
    let store: Arc<dyn RevocationStore> = Arc::new(InMemoryRevocationStore::new());
    store.revoke("token");
    assert!(store.is_revoked("token"));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_concurrent_revocations() {
    let store = Arc::new(InMemoryRevocationStore::new());

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..50 {
                    store.revoke(&format!("token-{}-{}", worker, i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.len(), 400);
    assert!(store.is_revoked("token-7-49"));
}

//! Revocation store trait defining the interface for revoked-token bookkeeping.

use std::sync::Arc;

/// Store of revoked tokens
///
/// A store only ever grows: tokens are added and queried, never removed.
/// Inserting cannot fail, so none of the methods return errors.
///
/// # Example
/// ```
/// use tw_core::repositories::{InMemoryRevocationStore, RevocationStore};
///
/// let store = InMemoryRevocationStore::new();
/// store.revoke("header.payload.signature");
///
/// assert!(store.is_revoked("header.payload.signature"));
/// assert!(!store.is_revoked("another.token.value"));
/// ```
pub trait RevocationStore: Send + Sync {
    /// Marks a token as revoked
    fn revoke(&self, token: &str);

    /// Checks whether a token has been revoked
    fn is_revoked(&self, token: &str) -> bool;

    /// Number of distinct revoked tokens
    fn len(&self) -> usize;

    /// Marks every token in `tokens` as revoked
    fn revoke_many<I, T>(&self, tokens: I)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
        Self: Sized,
    {
        for token in tokens {
            self.revoke(token.as_ref());
        }
    }

    /// Whether no token has been revoked yet
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: RevocationStore + ?Sized> RevocationStore for Arc<S> {
    fn revoke(&self, token: &str) {
        (**self).revoke(token)
    }

    fn is_revoked(&self, token: &str) -> bool {
        (**self).is_revoked(token)
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

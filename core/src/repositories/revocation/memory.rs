//! In-memory revocation store

use std::collections::HashSet;
use std::sync::{PoisonError, RwLock};

use sha2::{Digest, Sha256};

use super::r#trait::RevocationStore;

/// Process-lifetime revocation store.
///
/// Tokens are kept as SHA-256 hex digests so the store never holds usable
/// credentials. Entries are never evicted.
#[derive(Debug, Default)]
pub struct InMemoryRevocationStore {
    digests: RwLock<HashSet<String>>,
}

impl InMemoryRevocationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn digest(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hex::encode(hasher.finalize())
    }
}

impl RevocationStore for InMemoryRevocationStore {
    fn revoke(&self, token: &str) {
        let digest = Self::digest(token);
        // A poisoned set is still a valid set; insertion must not fail.
        let mut digests = self.digests.write().unwrap_or_else(PoisonError::into_inner);
        digests.insert(digest);
    }

    fn is_revoked(&self, token: &str) -> bool {
        let digest = Self::digest(token);
        let digests = self.digests.read().unwrap_or_else(PoisonError::into_inner);
        digests.contains(&digest)
    }

    fn len(&self) -> usize {
        self.digests
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

//! Mock codecs and helpers for token service tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::Value;

use crate::domain::entities::token::{payload_from, Payload, SignOptions, VerifyOptions};
use crate::errors::TokenError;
use crate::repositories::InMemoryRevocationStore;
use crate::services::token::{JsonWebTokenCodec, JwtCodec, TokenService};

/// Wraps the real codec and counts calls
#[derive(Default)]
pub struct CountingCodec {
    inner: JsonWebTokenCodec,
    pub signs: Arc<AtomicUsize>,
    pub verifies: Arc<AtomicUsize>,
}

impl CountingCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sign_count(&self) -> usize {
        self.signs.load(Ordering::SeqCst)
    }

    pub fn verify_count(&self) -> usize {
        self.verifies.load(Ordering::SeqCst)
    }
}

impl JwtCodec for CountingCodec {
    fn sign(&self, payload: &Payload, secret: &str, options: &SignOptions) -> Result<String, TokenError> {
        self.signs.fetch_add(1, Ordering::SeqCst);
        self.inner.sign(payload, secret, options)
    }

    fn verify(&self, token: &str, secret: &str, options: &VerifyOptions) -> Result<Payload, TokenError> {
        self.verifies.fetch_add(1, Ordering::SeqCst);
        self.inner.verify(token, secret, options)
    }
}

/// Codec whose every call fails with an unrecognised error
pub struct BrokenCodec;

impl JwtCodec for BrokenCodec {
    fn sign(&self, _payload: &Payload, _secret: &str, _options: &SignOptions) -> Result<String, TokenError> {
        Err(TokenError::unexpected("codec offline"))
    }

    fn verify(&self, _token: &str, _secret: &str, _options: &VerifyOptions) -> Result<Payload, TokenError> {
        Err(TokenError::unexpected("codec offline"))
    }
}

pub fn create_test_service() -> TokenService {
    TokenService::new(InMemoryRevocationStore::new())
}

pub fn create_counting_service() -> TokenService<InMemoryRevocationStore, CountingCodec> {
    TokenService::with_codec(InMemoryRevocationStore::new(), CountingCodec::new())
}

pub fn payload(value: Value) -> Payload {
    payload_from(value).expect("test payload must be an object")
}

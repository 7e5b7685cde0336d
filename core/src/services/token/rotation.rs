//! Refresh token rotation configuration

use std::sync::Arc;

use crate::domain::entities::token::{Payload, SignOptions, VerifyOptions};

/// Caller-supplied mapping from the refresh payload to the access payload
pub type PayloadTransform = Arc<dyn Fn(Payload) -> Payload + Send + Sync>;

/// How the new access token's payload is derived during rotation
#[derive(Clone, Default)]
pub enum AccessPayload {
    /// Reuse the refresh token's payload (timing claims removed)
    #[default]
    Inherit,
    /// Pass the refresh token's payload (timing claims removed) through a
    /// caller function
    Transform(PayloadTransform),
    /// Use a payload supplied by the caller, ignoring the refresh payload
    Explicit(Payload),
}

impl AccessPayload {
    pub fn transform<F>(f: F) -> Self
    where
        F: Fn(Payload) -> Payload + Send + Sync + 'static,
    {
        AccessPayload::Transform(Arc::new(f))
    }

    pub(crate) fn resolve(&self, inherited: &Payload) -> Payload {
        match self {
            AccessPayload::Inherit => inherited.clone(),
            AccessPayload::Transform(f) => f(inherited.clone()),
            AccessPayload::Explicit(payload) => payload.clone(),
        }
    }
}

impl std::fmt::Debug for AccessPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessPayload::Inherit => f.write_str("Inherit"),
            AccessPayload::Transform(_) => f.write_str("Transform(<fn>)"),
            AccessPayload::Explicit(payload) => f.debug_tuple("Explicit").field(payload).finish(),
        }
    }
}

/// Everything [`TokenService::rotate`](super::TokenService::rotate) needs to
/// exchange a refresh token for new tokens
#[derive(Clone)]
pub struct RotationConfig {
    /// Secret the refresh token was signed with; also signs reissued refresh
    /// tokens
    pub refresh_secret: String,

    /// Secret for the new access token. Falls back to `refresh_secret`.
    pub access_secret: Option<String>,

    /// How the access payload is derived
    pub access_payload: AccessPayload,

    /// Sign options for the new access token
    pub access_options: SignOptions,

    /// Sign options for a reissued refresh token; `None` issues no new
    /// refresh token
    pub refresh_options: Option<SignOptions>,

    /// Options used to verify the presented refresh token
    pub refresh_verify: VerifyOptions,
}

impl RotationConfig {
    pub fn new(refresh_secret: impl Into<String>) -> Self {
        Self {
            refresh_secret: refresh_secret.into(),
            access_secret: None,
            access_payload: AccessPayload::Inherit,
            access_options: SignOptions::default(),
            refresh_options: None,
            refresh_verify: VerifyOptions::default(),
        }
    }

    pub fn with_access_secret(mut self, secret: impl Into<String>) -> Self {
        self.access_secret = Some(secret.into());
        self
    }

    pub fn with_access_payload(mut self, access_payload: AccessPayload) -> Self {
        self.access_payload = access_payload;
        self
    }

    pub fn transform<F>(self, f: F) -> Self
    where
        F: Fn(Payload) -> Payload + Send + Sync + 'static,
    {
        self.with_access_payload(AccessPayload::transform(f))
    }

    pub fn explicit(self, payload: Payload) -> Self {
        self.with_access_payload(AccessPayload::Explicit(payload))
    }

    pub fn with_access_options(mut self, options: SignOptions) -> Self {
        self.access_options = options;
        self
    }

    /// Issue a new refresh token signed with these options
    pub fn reissue_refresh(mut self, options: SignOptions) -> Self {
        self.refresh_options = Some(options);
        self
    }

    pub fn with_refresh_verify(mut self, options: VerifyOptions) -> Self {
        self.refresh_verify = options;
        self
    }

    /// Secret used to sign the new access token
    pub fn access_secret(&self) -> &str {
        self.access_secret.as_deref().unwrap_or(&self.refresh_secret)
    }
}

impl std::fmt::Debug for RotationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotationConfig")
            .field("refresh_secret", &"<redacted>")
            .field("access_secret", &self.access_secret.as_ref().map(|_| "<redacted>"))
            .field("access_payload", &self.access_payload)
            .field("access_options", &self.access_options)
            .field("refresh_options", &self.refresh_options)
            .field("refresh_verify", &self.refresh_verify)
            .finish()
    }
}

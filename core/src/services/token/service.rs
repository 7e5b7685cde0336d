//! Main token service implementation

use serde_json::Value;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::domain::entities::token::{
    strip_claims_set_by, strip_timing_claims, Credentials, Payload, SignOptions, TokenPair,
    TokenRequest, VerifyOptions, CLAIM_JTI,
};
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::{InMemoryRevocationStore, RevocationStore};

use super::codec::{JsonWebTokenCodec, JwtCodec};
use super::outcome::{AuthOutcome, IssueOutcome, RefreshOutcome};
use super::rotation::RotationConfig;

/// Issues, verifies, revokes and rotates tokens.
///
/// Signing and verification go through the codec `C`; revoked tokens are
/// recorded in the injected store `S`. Services built over different stores
/// are fully independent.
pub struct TokenService<S = InMemoryRevocationStore, C = JsonWebTokenCodec>
where
    S: RevocationStore,
    C: JwtCodec,
{
    store: S,
    codec: C,
}

impl Default for TokenService {
    fn default() -> Self {
        Self::new(InMemoryRevocationStore::new())
    }
}

impl<S: RevocationStore> TokenService<S, JsonWebTokenCodec> {
    /// Creates a service over `store` using the `jsonwebtoken` codec
    pub fn new(store: S) -> Self {
        Self::with_codec(store, JsonWebTokenCodec::new())
    }
}

impl<S: RevocationStore, C: JwtCodec> TokenService<S, C> {
    /// Creates a service with an explicit codec
    pub fn with_codec(store: S, codec: C) -> Self {
        Self { store, codec }
    }

    /// The revocation store backing this service
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The codec used for signing and verification
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Signs an access token and, when `refresh` is given, a refresh token
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - The signed tokens
    /// * `Err(DomainError)` - `TokenError::GenerationFailed` when signing or the
    ///   options were rejected, `TokenError::Unexpected` otherwise
    pub fn issue(
        &self,
        access: &TokenRequest,
        refresh: Option<&TokenRequest>,
    ) -> DomainResult<TokenPair> {
        let access_token = self.sign(access)?;
        let refresh_token = refresh.map(|request| self.sign(request)).transpose()?;

        debug!(with_refresh = refresh_token.is_some(), "Issued token pair");
        Ok(TokenPair::new(access_token, refresh_token))
    }

    /// [`issue`](Self::issue) reported as an [`IssueOutcome`]
    pub fn issue_outcome(&self, access: &TokenRequest, refresh: Option<&TokenRequest>) -> IssueOutcome {
        self.issue(access, refresh).into()
    }

    /// Verifies `token` against `secret` with default options
    ///
    /// The returned payload includes the claims added at signing time
    /// (`iat`, `exp`, ...). Revocation is not consulted; see
    /// [`verify_active`](Self::verify_active).
    pub fn verify(&self, token: &str, secret: &str) -> DomainResult<Payload> {
        self.verify_with(token, secret, &VerifyOptions::default())
    }

    /// Verifies `token` against `secret` with explicit options
    pub fn verify_with(
        &self,
        token: &str,
        secret: &str,
        options: &VerifyOptions,
    ) -> DomainResult<Payload> {
        match self.codec.verify(token, secret, options) {
            Ok(payload) => {
                debug!(claims = payload.len(), "Token verified");
                Ok(payload)
            }
            Err(e) => {
                log_failure(&e, "Token verification failed");
                Err(e.into())
            }
        }
    }

    /// Verifies `token` and additionally rejects it if it has been revoked
    pub fn verify_active(
        &self,
        token: &str,
        secret: &str,
        options: &VerifyOptions,
    ) -> DomainResult<Payload> {
        let payload = self.verify_with(token, secret, options)?;
        if self.store.is_revoked(token) {
            warn!("Rejected revoked token");
            return Err(TokenError::Revoked.into());
        }
        Ok(payload)
    }

    /// Verifies the access token of `credentials` and reports the result as
    /// an [`AuthOutcome`]. The refresh token, if any, is not consulted.
    pub fn authenticate(&self, credentials: &Credentials, secret: &str) -> AuthOutcome {
        self.verify(&credentials.access_token, secret).into()
    }

    /// Marks `token` as revoked
    pub fn revoke(&self, token: &str) {
        self.store.revoke(token);
        debug!("Token revoked");
    }

    /// Marks every token in `tokens` as revoked
    pub fn revoke_many<I, T>(&self, tokens: I)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.store.revoke_many(tokens);
        debug!(revoked = self.store.len(), "Tokens revoked");
    }

    /// Checks whether `token` has been revoked
    pub fn is_revoked(&self, token: &str) -> bool {
        self.store.is_revoked(token)
    }

    /// Exchanges a refresh token for new tokens
    ///
    /// The refresh token is checked against the revocation store first, then
    /// verified with `config.refresh_secret`. Its payload, without `iat`,
    /// `exp`, `nbf` and `jti`, feeds the access payload strategy. Claims the
    /// target sign options set themselves (`iss`, `sub`, `aud`) are dropped
    /// from the inherited payload before each token is signed. A reissued
    /// refresh token gets a fresh `jti` so it can never equal the consumed
    /// one. The consumed refresh token is revoked only once every new token
    /// has been signed.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - New access token, plus a refresh token when
    ///   `config.refresh_options` is set
    /// * `Err(DomainError)` - `TokenError::Revoked` or `TokenError::Rejected`
    ///   (401) for an unusable refresh token, signing errors as in
    ///   [`issue`](Self::issue)
    pub fn rotate(&self, refresh_token: &str, config: &RotationConfig) -> DomainResult<TokenPair> {
        if self.store.is_revoked(refresh_token) {
            warn!("Rotation attempted with revoked refresh token");
            return Err(TokenError::Revoked.into());
        }

        let mut inherited = self.verify_with(refresh_token, &config.refresh_secret, &config.refresh_verify)?;
        strip_timing_claims(&mut inherited);
        inherited.remove(CLAIM_JTI);

        let mut access_base = inherited.clone();
        strip_claims_set_by(&mut access_base, &config.access_options);
        let access_payload = config.access_payload.resolve(&access_base);
        let access_token = self.sign_with(&access_payload, config.access_secret(), &config.access_options)?;

        let new_refresh_token = config
            .refresh_options
            .as_ref()
            .map(|options| {
                let mut refresh_payload = inherited.clone();
                strip_claims_set_by(&mut refresh_payload, options);
                if options.jwt_id.is_none() {
                    refresh_payload.insert(CLAIM_JTI.to_string(), Value::from(Uuid::new_v4().to_string()));
                }
                self.sign_with(&refresh_payload, &config.refresh_secret, options)
            })
            .transpose()?;

        self.store.revoke(refresh_token);
        debug!(
            reissued_refresh = new_refresh_token.is_some(),
            "Refresh token rotated"
        );

        Ok(TokenPair::new(access_token, new_refresh_token))
    }

    /// [`rotate`](Self::rotate) reported as a [`RefreshOutcome`]
    pub fn rotate_outcome(&self, refresh_token: &str, config: &RotationConfig) -> RefreshOutcome {
        self.rotate(refresh_token, config).into()
    }

    fn sign(&self, request: &TokenRequest) -> DomainResult<String> {
        self.sign_with(&request.payload, &request.secret, &request.options)
    }

    fn sign_with(
        &self,
        payload: &Payload,
        secret: &str,
        options: &SignOptions,
    ) -> DomainResult<String> {
        self.codec.sign(payload, secret, options).map_err(|e| {
            log_failure(&e, "Token signing failed");
            DomainError::from(e)
        })
    }
}

fn log_failure(error: &TokenError, context: &str) {
    match error {
        TokenError::Rejected { message } => warn!(reason = %message, "{}", context),
        TokenError::Revoked => warn!("{}: token revoked", context),
        TokenError::GenerationFailed { reason } => error!(reason = %reason, "{}", context),
        TokenError::Unexpected { message } => error!(error = %message, "{}", context),
    }
}

//! Token entities: payloads, sign/verify options and issued token pairs.

use jsonwebtoken::Algorithm;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::value_objects::Timespan;
use crate::errors::ValidationError;

/// Claims carried by a token. Arbitrary caller data plus the registered
/// claims the signer adds.
pub type Payload = serde_json::Map<String, Value>;

/// Issued-at claim
pub const CLAIM_IAT: &str = "iat";

/// Expiration claim
pub const CLAIM_EXP: &str = "exp";

/// Not-before claim
pub const CLAIM_NBF: &str = "nbf";

/// Token id claim
pub const CLAIM_JTI: &str = "jti";

/// Claims tied to the moment a token was signed. They are removed before a
/// payload is signed again.
pub const TIMING_CLAIMS: [&str; 3] = [CLAIM_IAT, CLAIM_EXP, CLAIM_NBF];

/// Converts a JSON value into a payload
///
/// # Errors
///
/// Returns `ValidationError::PayloadNotObject` unless `value` is an object.
pub fn payload_from(value: Value) -> Result<Payload, ValidationError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ValidationError::PayloadNotObject),
    }
}

/// Removes `iat`, `exp` and `nbf` from a payload
pub fn strip_timing_claims(payload: &mut Payload) {
    for claim in TIMING_CLAIMS {
        payload.remove(claim);
    }
}

/// Removes the registered claims that `options` will set when signing
pub fn strip_claims_set_by(payload: &mut Payload, options: &SignOptions) {
    let set_by_options = [
        (CLAIM_EXP, options.expires_in.is_some()),
        (CLAIM_NBF, options.not_before.is_some()),
        ("iss", options.issuer.is_some()),
        ("sub", options.subject.is_some()),
        ("aud", options.audience.is_some()),
        (CLAIM_JTI, options.jwt_id.is_some()),
    ];
    for (claim, set) in set_by_options {
        if set {
            payload.remove(claim);
        }
    }
}

/// Options applied when signing a token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignOptions {
    /// Signing algorithm
    #[serde(default = "default_algorithm")]
    pub algorithm: Algorithm,

    /// Lifetime, relative to `iat`
    #[serde(default)]
    pub expires_in: Option<Timespan>,

    /// Delay before the token becomes valid, relative to `iat`
    #[serde(default)]
    pub not_before: Option<Timespan>,

    /// `iss` claim
    #[serde(default)]
    pub issuer: Option<String>,

    /// `sub` claim
    #[serde(default)]
    pub subject: Option<String>,

    /// `aud` claim
    #[serde(default)]
    pub audience: Option<String>,

    /// `jti` claim
    #[serde(default)]
    pub jwt_id: Option<String>,

    /// `kid` header
    #[serde(default)]
    pub key_id: Option<String>,

    /// Do not add an `iat` claim
    #[serde(default)]
    pub no_timestamp: bool,
}

impl Default for SignOptions {
    fn default() -> Self {
        Self {
            algorithm: default_algorithm(),
            expires_in: None,
            not_before: None,
            issuer: None,
            subject: None,
            audience: None,
            jwt_id: None,
            key_id: None,
            no_timestamp: false,
        }
    }
}

impl SignOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn expires_in(mut self, span: impl Into<Timespan>) -> Self {
        self.expires_in = Some(span.into());
        self
    }

    pub fn not_before(mut self, span: impl Into<Timespan>) -> Self {
        self.not_before = Some(span.into());
        self
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    pub fn with_jwt_id(mut self, jwt_id: impl Into<String>) -> Self {
        self.jwt_id = Some(jwt_id.into());
        self
    }

    /// Sets a random UUID v4 as `jti`
    pub fn with_random_jwt_id(self) -> Self {
        self.with_jwt_id(uuid::Uuid::new_v4().to_string())
    }

    pub fn with_key_id(mut self, key_id: impl Into<String>) -> Self {
        self.key_id = Some(key_id.into());
        self
    }

    pub fn without_timestamp(mut self) -> Self {
        self.no_timestamp = true;
        self
    }
}

/// Options applied when verifying a token
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerifyOptions {
    /// Accepted algorithms. Empty means "derive from the secret".
    #[serde(default)]
    pub algorithms: Vec<Algorithm>,

    /// Required `iss`
    #[serde(default)]
    pub issuer: Option<String>,

    /// Required `aud`
    #[serde(default)]
    pub audience: Option<String>,

    /// Required `sub`
    #[serde(default)]
    pub subject: Option<String>,

    /// Clock skew tolerated for `exp` and `nbf`, in seconds
    #[serde(default)]
    pub leeway_seconds: u64,

    /// Accept tokens past their `exp`
    #[serde(default)]
    pub ignore_expiration: bool,

    /// Accept tokens before their `nbf`
    #[serde(default)]
    pub ignore_not_before: bool,
}

impl VerifyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_algorithms(mut self, algorithms: impl IntoIterator<Item = Algorithm>) -> Self {
        self.algorithms = algorithms.into_iter().collect();
        self
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_leeway(mut self, seconds: u64) -> Self {
        self.leeway_seconds = seconds;
        self
    }

    pub fn ignoring_expiration(mut self) -> Self {
        self.ignore_expiration = true;
        self
    }

    pub fn ignoring_not_before(mut self) -> Self {
        self.ignore_not_before = true;
        self
    }
}

/// Everything needed to sign one token
#[derive(Clone, PartialEq)]
pub struct TokenRequest {
    pub payload: Payload,
    pub secret: String,
    pub options: SignOptions,
}

impl TokenRequest {
    pub fn new(payload: Payload, secret: impl Into<String>) -> Self {
        Self {
            payload,
            secret: secret.into(),
            options: SignOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SignOptions) -> Self {
        self.options = options;
        self
    }
}

impl std::fmt::Debug for TokenRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenRequest")
            .field("payload", &self.payload)
            .field("secret", &"<redacted>")
            .field("options", &self.options)
            .finish()
    }
}

/// Tokens returned to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Signed access token
    pub access_token: String,

    /// Signed refresh token, when one was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl TokenPair {
    pub fn new(access_token: String, refresh_token: Option<String>) -> Self {
        Self {
            access_token,
            refresh_token,
        }
    }
}

/// Tokens presented by a caller for authentication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl Credentials {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
        }
    }
}

impl From<TokenPair> for Credentials {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }
    }
}

fn default_algorithm() -> Algorithm {
    Algorithm::HS256
}

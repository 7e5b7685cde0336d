//! JWT codec: the signing/verification primitive behind the token service

use std::collections::HashSet;

use chrono::Utc;
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{decode, decode_header, encode, Algorithm, Header, Validation};
use serde_json::Value;

use crate::domain::entities::token::{Payload, SignOptions, VerifyOptions, CLAIM_EXP, CLAIM_IAT, CLAIM_NBF};
use crate::domain::value_objects::Timespan;
use crate::errors::{TokenError, ValidationError};

use super::keys;

/// Signs payloads into tokens and verifies tokens back into payloads.
///
/// Implementations report signing problems as
/// [`TokenError::GenerationFailed`] and verification problems as
/// [`TokenError::Rejected`]; anything else is [`TokenError::Unexpected`].
pub trait JwtCodec: Send + Sync {
    /// Signs `payload` with `secret`
    fn sign(&self, payload: &Payload, secret: &str, options: &SignOptions) -> Result<String, TokenError>;

    /// Verifies `token` against `secret` and returns its claims
    fn verify(&self, token: &str, secret: &str, options: &VerifyOptions) -> Result<Payload, TokenError>;
}

/// [`JwtCodec`] backed by the `jsonwebtoken` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonWebTokenCodec;

impl JsonWebTokenCodec {
    pub fn new() -> Self {
        Self
    }
}

impl JwtCodec for JsonWebTokenCodec {
    fn sign(&self, payload: &Payload, secret: &str, options: &SignOptions) -> Result<String, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::generation_failed("secret must have a value"));
        }

        let claims = build_claims(payload, options, Utc::now().timestamp())
            .map_err(|e| TokenError::generation_failed(e.to_string()))?;

        let key = keys::encoding_key(secret, options.algorithm)
            .map_err(|e| TokenError::generation_failed(e.to_string()))?;

        let mut header = Header::new(options.algorithm);
        header.kid = options.key_id.clone();

        encode(&header, &claims, &key).map_err(|e| TokenError::generation_failed(e.to_string()))
    }

    fn verify(&self, token: &str, secret: &str, options: &VerifyOptions) -> Result<Payload, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::rejected("secret or public key must be provided"));
        }

        let header = decode_header(token).map_err(map_verify_error)?;

        let allowed = if options.algorithms.is_empty() {
            keys::default_algorithms(secret)
        } else {
            options.algorithms.clone()
        };
        if !allowed.contains(&header.alg) {
            return Err(TokenError::rejected("invalid algorithm"));
        }

        let key = keys::decoding_key(secret, header.alg).map_err(map_verify_error)?;
        let validation = build_validation(header.alg, options);

        decode::<Payload>(token, &key, &validation)
            .map(|data| data.claims)
            .map_err(map_verify_error)
    }
}

/// Adds the registered claims requested by `options` to a copy of `payload`.
///
/// `iat` defaults to `now` unless the payload already carries one; `exp` and
/// `nbf` are relative to that `iat`. A claim may come from the payload or from
/// the options, never both.
pub(crate) fn build_claims(
    payload: &Payload,
    options: &SignOptions,
    now: i64,
) -> Result<Payload, ValidationError> {
    let mut claims = payload.clone();
    let timestamp = claims.get(CLAIM_IAT).and_then(Value::as_i64).unwrap_or(now);

    if options.no_timestamp {
        claims.remove(CLAIM_IAT);
    } else {
        claims.insert(CLAIM_IAT.to_string(), Value::from(timestamp));
    }

    insert_relative(&mut claims, CLAIM_NBF, options.not_before.as_ref(), timestamp)?;
    insert_relative(&mut claims, CLAIM_EXP, options.expires_in.as_ref(), timestamp)?;

    let registered = [
        ("iss", &options.issuer),
        ("sub", &options.subject),
        ("aud", &options.audience),
        ("jti", &options.jwt_id),
    ];
    for (claim, value) in registered {
        if let Some(value) = value {
            reject_conflict(&claims, claim)?;
            claims.insert(claim.to_string(), Value::from(value.clone()));
        }
    }

    Ok(claims)
}

fn insert_relative(
    claims: &mut Payload,
    claim: &str,
    span: Option<&Timespan>,
    timestamp: i64,
) -> Result<(), ValidationError> {
    let Some(span) = span else {
        return Ok(());
    };

    reject_conflict(claims, claim)?;
    let seconds = span.to_seconds()?;
    let value = timestamp
        .checked_add(seconds)
        .ok_or_else(|| ValidationError::InvalidTimespan {
            value: format!("{:?}", span),
        })?;
    claims.insert(claim.to_string(), Value::from(value));
    Ok(())
}

fn reject_conflict(claims: &Payload, claim: &str) -> Result<(), ValidationError> {
    if claims.contains_key(claim) {
        return Err(ValidationError::ClaimConflict {
            claim: claim.to_string(),
        });
    }
    Ok(())
}

fn build_validation(algorithm: Algorithm, options: &VerifyOptions) -> Validation {
    let mut validation = Validation::new(algorithm);
    validation.required_spec_claims = HashSet::new();
    validation.leeway = options.leeway_seconds;
    validation.validate_exp = !options.ignore_expiration;
    validation.validate_nbf = !options.ignore_not_before;

    if let Some(ref issuer) = options.issuer {
        validation.set_issuer(&[issuer]);
    }
    match options.audience {
        Some(ref audience) => validation.set_audience(&[audience]),
        None => validation.validate_aud = false,
    }
    validation.sub = options.subject.clone();

    validation
}

/// Maps a `jsonwebtoken` verification error onto a caller-facing rejection.
pub(crate) fn map_verify_error(error: JwtError) -> TokenError {
    let message = match error.kind() {
        ErrorKind::ExpiredSignature => "jwt expired",
        ErrorKind::ImmatureSignature => "jwt not active",
        ErrorKind::InvalidSignature => "invalid signature",
        ErrorKind::InvalidToken
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_) => "jwt malformed",
        ErrorKind::InvalidAlgorithm
        | ErrorKind::MissingAlgorithm
        | ErrorKind::InvalidAlgorithmName => "invalid algorithm",
        ErrorKind::InvalidIssuer => "jwt issuer invalid",
        ErrorKind::InvalidAudience => "jwt audience invalid",
        ErrorKind::InvalidSubject => "jwt subject invalid",
        ErrorKind::MissingRequiredClaim(_) => "jwt missing required claim",
        ErrorKind::InvalidKeyFormat | ErrorKind::InvalidRsaKey(_) | ErrorKind::InvalidEcdsaKey => {
            "invalid key"
        }
        _ => return TokenError::unexpected(error.to_string()),
    };
    TokenError::rejected(message)
}

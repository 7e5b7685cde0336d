//! Key resolution for JWT signing and verification
//!
//! Secrets are plain strings. HMAC algorithms use the raw bytes; the
//! asymmetric families expect a PEM document (private key for signing,
//! public key for verification).

use jsonwebtoken::errors::Result as JwtResult;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};

const PEM_PREFIX: &str = "-----BEGIN";

const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

const RSA_ALGORITHMS: [Algorithm; 6] = [
    Algorithm::RS256,
    Algorithm::RS384,
    Algorithm::RS512,
    Algorithm::PS256,
    Algorithm::PS384,
    Algorithm::PS512,
];

const EC_ALGORITHMS: [Algorithm; 2] = [Algorithm::ES256, Algorithm::ES384];

/// Key family an algorithm belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFamily {
    Hmac,
    Rsa,
    Ec,
    Ed,
}

impl KeyFamily {
    pub fn of(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => KeyFamily::Hmac,
            Algorithm::RS256
            | Algorithm::RS384
            | Algorithm::RS512
            | Algorithm::PS256
            | Algorithm::PS384
            | Algorithm::PS512 => KeyFamily::Rsa,
            Algorithm::ES256 | Algorithm::ES384 => KeyFamily::Ec,
            Algorithm::EdDSA => KeyFamily::Ed,
        }
    }
}

/// Whether the secret looks like a PEM document
pub fn is_pem(secret: &str) -> bool {
    secret.trim_start().starts_with(PEM_PREFIX)
}

/// Builds the signing key for `algorithm` from `secret`
pub fn encoding_key(secret: &str, algorithm: Algorithm) -> JwtResult<EncodingKey> {
    let bytes = secret.as_bytes();
    match KeyFamily::of(algorithm) {
        KeyFamily::Hmac => Ok(EncodingKey::from_secret(bytes)),
        KeyFamily::Rsa => EncodingKey::from_rsa_pem(bytes),
        KeyFamily::Ec => EncodingKey::from_ec_pem(bytes),
        KeyFamily::Ed => EncodingKey::from_ed_pem(bytes),
    }
}

/// Builds the verification key for `algorithm` from `secret`
pub fn decoding_key(secret: &str, algorithm: Algorithm) -> JwtResult<DecodingKey> {
    let bytes = secret.as_bytes();
    match KeyFamily::of(algorithm) {
        KeyFamily::Hmac => Ok(DecodingKey::from_secret(bytes)),
        KeyFamily::Rsa => DecodingKey::from_rsa_pem(bytes),
        KeyFamily::Ec => DecodingKey::from_ec_pem(bytes),
        KeyFamily::Ed => DecodingKey::from_ed_pem(bytes),
    }
}

/// Algorithms accepted for `secret` when the caller does not list any.
///
/// Plain secrets only ever verify HMAC tokens, so a token cannot downgrade
/// a PEM public key into an HMAC secret or the other way round.
pub fn default_algorithms(secret: &str) -> Vec<Algorithm> {
    if !is_pem(secret) {
        return HMAC_ALGORITHMS.to_vec();
    }

    let first_line = secret.trim_start().lines().next().unwrap_or_default();
    if first_line.contains("RSA") {
        RSA_ALGORITHMS.to_vec()
    } else if first_line.contains("EC ") {
        EC_ALGORITHMS.to_vec()
    } else {
        RSA_ALGORITHMS
            .iter()
            .chain(EC_ALGORITHMS.iter())
            .copied()
            .chain(std::iter::once(Algorithm::EdDSA))
            .collect()
    }
}

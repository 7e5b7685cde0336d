//! Token error types
//!
//! Two kinds of failure cross the service boundary: errors reported by the
//! JWT library (bad signature, expiry, malformed input, failed signing) and
//! anything the service does not recognise.

use thiserror::Error;
use tw_shared::errors::{status_codes, IntoStatusResponse, StatusResponse};

/// Message reported for signing failures
pub const GENERATION_FAILED_MESSAGE: &str = "Token generation failed";

/// Message reported for unrecognised failures
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred";

/// Message reported for revoked tokens
pub const REVOKED_MESSAGE: &str = "Token revoked";

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The library refused to sign, or the sign options were unusable
    #[error("Token generation failed: {reason}")]
    GenerationFailed { reason: String },

    /// The library rejected the token during verification
    #[error("{message}")]
    Rejected { message: String },

    /// The token is in the revocation store
    #[error("Token revoked")]
    Revoked,

    /// Anything not recognised as a library error
    #[error("Unexpected error: {message}")]
    Unexpected { message: String },
}

impl TokenError {
    pub fn generation_failed(reason: impl Into<String>) -> Self {
        TokenError::GenerationFailed {
            reason: reason.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        TokenError::Rejected {
            message: message.into(),
        }
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        TokenError::Unexpected {
            message: message.into(),
        }
    }

    /// HTTP-equivalent status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            TokenError::Rejected { .. } | TokenError::Revoked => status_codes::UNAUTHORIZED,
            TokenError::GenerationFailed { .. } | TokenError::Unexpected { .. } => {
                status_codes::INTERNAL_ERROR
            }
        }
    }

    /// Message safe to hand back to callers.
    ///
    /// Verification messages come from the library and are passed through;
    /// signing and unexpected failures are reported generically.
    pub fn public_message(&self) -> String {
        match self {
            TokenError::GenerationFailed { .. } => GENERATION_FAILED_MESSAGE.to_string(),
            TokenError::Rejected { message } => message.clone(),
            TokenError::Revoked => REVOKED_MESSAGE.to_string(),
            TokenError::Unexpected { .. } => UNEXPECTED_MESSAGE.to_string(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            TokenError::GenerationFailed { .. } => status_codes::TOKEN_GENERATION_FAILED,
            TokenError::Rejected { .. } => status_codes::TOKEN_INVALID,
            TokenError::Revoked => status_codes::TOKEN_REVOKED,
            TokenError::Unexpected { .. } => status_codes::UNEXPECTED_ERROR,
        }
    }
}

impl IntoStatusResponse for TokenError {
    fn to_status_response(&self) -> StatusResponse {
        StatusResponse::new(self.error_code(), self.public_message(), self.status_code())
    }
}

/// Errors in caller-supplied values such as timespans or algorithm names
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid timespan: {value}")]
    InvalidTimespan { value: String },

    #[error("Unsupported algorithm: {name}")]
    UnsupportedAlgorithm { name: String },

    #[error("Reserved claim conflict: {claim}")]
    ClaimConflict { claim: String },

    #[error("Payload must be a JSON object")]
    PayloadNotObject,
}

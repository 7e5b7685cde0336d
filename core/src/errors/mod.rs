//! Domain-specific error types and error handling.

mod types;

pub use types::{
    TokenError, ValidationError, GENERATION_FAILED_MESSAGE, REVOKED_MESSAGE, UNEXPECTED_MESSAGE,
};

use thiserror::Error;
use tw_shared::errors::{status_codes, IntoStatusResponse, StatusResponse};

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    // Bridge to specific error types
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl DomainError {
    /// HTTP-equivalent status code
    pub fn status_code(&self) -> u16 {
        match self {
            DomainError::Token(e) => e.status_code(),
            DomainError::Validation(_) => status_codes::INTERNAL_ERROR,
        }
    }

    /// Message safe to hand back to callers
    pub fn public_message(&self) -> String {
        match self {
            DomainError::Token(e) => e.public_message(),
            DomainError::Validation(e) => e.to_string(),
        }
    }
}

impl IntoStatusResponse for DomainError {
    fn to_status_response(&self) -> StatusResponse {
        match self {
            DomainError::Token(e) => e.to_status_response(),
            DomainError::Validation(e) => StatusResponse::new(
                status_codes::VALIDATION_ERROR,
                e.to_string(),
                self.status_code(),
            ),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_error_status_codes() {
        assert_eq!(TokenError::rejected("jwt expired").status_code(), 401);
        assert_eq!(TokenError::Revoked.status_code(), 401);
        assert_eq!(TokenError::generation_failed("bad key").status_code(), 500);
        assert_eq!(TokenError::unexpected("boom").status_code(), 500);
    }

    #[test]
    fn test_public_messages_hide_internal_reasons() {
        let err = DomainError::from(TokenError::generation_failed("bad key"));
        assert_eq!(err.public_message(), "Token generation failed");

        let err = DomainError::from(TokenError::unexpected("boom"));
        assert_eq!(err.public_message(), "An unexpected error occurred");
        assert_eq!(err.status_code(), 500);

        let err = DomainError::from(ValidationError::UnsupportedAlgorithm {
            name: "HS1024".to_string(),
        });
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.to_status_response().error, status_codes::VALIDATION_ERROR);
    }

    #[test]
    fn test_rejected_message_passes_through() {
        let err = DomainError::from(TokenError::rejected("invalid signature"));
        let response = err.to_status_response();

        assert_eq!(response.status, 401);
        assert_eq!(response.message, "invalid signature");
        assert_eq!(response.error, status_codes::TOKEN_INVALID);
    }
}

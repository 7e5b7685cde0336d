//! Shared status response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status response describing a failed token operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Error code for client identification
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP-equivalent status code
    pub status: u16,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl StatusResponse {
    /// Create a new status response
    pub fn new(error: impl Into<String>, message: impl Into<String>, status: u16) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status,
            timestamp: Utc::now(),
        }
    }
}

/// Status codes and error codes used by token operations
pub mod status_codes {
    pub const OK: u16 = 200;
    pub const UNAUTHORIZED: u16 = 401;
    pub const INTERNAL_ERROR: u16 = 500;

    pub const TOKEN_GENERATION_FAILED: &str = "TOKEN_GENERATION_FAILED";
    pub const TOKEN_INVALID: &str = "TOKEN_INVALID";
    pub const TOKEN_REVOKED: &str = "TOKEN_REVOKED";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const UNEXPECTED_ERROR: &str = "UNEXPECTED_ERROR";
}

/// Trait for converting errors to StatusResponse
pub trait IntoStatusResponse {
    fn to_status_response(&self) -> StatusResponse;
}

//! Token service module for JWT management
//!
//! This module handles all token-related operations including:
//! - Access/refresh token issuing and verification
//! - Revocation through an injected store
//! - Refresh token rotation
//! - Key resolution for HMAC and PEM secrets

mod codec;
mod config;
mod keys;
mod outcome;
mod rotation;
mod service;

#[cfg(test)]
mod tests;

pub use codec::{JsonWebTokenCodec, JwtCodec};
pub use config::TokenServiceConfig;
pub use keys::{default_algorithms, KeyFamily};
pub use outcome::{AuthOutcome, IssueOutcome, RefreshOutcome};
pub use rotation::{AccessPayload, PayloadTransform, RotationConfig};
pub use service::TokenService;

//! # Tokenward Core
//!
//! Issues access/refresh token pairs, verifies tokens, keeps an injected
//! revocation store and rotates refresh tokens. Signing and verification are
//! delegated to the `jsonwebtoken` crate behind the [`JwtCodec`] seam.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;

//! Shared utilities and common types for Tokenward
//!
//! This crate provides common functionality used by the token crates:
//! - Configuration types
//! - Logging initialisation
//! - Status response structures

pub mod config;
pub mod errors;
pub mod logging;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, Environment, JwtConfig, LogFormat, LoggingConfig, RotationSettings,
};
pub use errors::{status_codes, IntoStatusResponse, StatusResponse};
pub use logging::{init as init_logging, LoggingError};

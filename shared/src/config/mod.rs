//! Configuration module
//!
//! - `auth` - Token signing and rotation configuration
//! - `environment` - Environment detection and logging configuration

pub mod auth;
pub mod environment;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{JwtConfig, RotationSettings};
pub use environment::{Environment, LogFormat, LoggingConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Token signing configuration
    pub jwt: JwtConfig,

    /// Refresh rotation settings
    #[serde(default)]
    pub rotation: RotationSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            jwt: JwtConfig::default(),
            rotation: RotationSettings::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            jwt: JwtConfig::default(),
            rotation: RotationSettings::default(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Create configuration for production environment
    ///
    /// Secrets are taken from the environment; anything left at a default
    /// value is reported through [`JwtConfig::is_using_default_secret`].
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            jwt: JwtConfig::from_env(),
            rotation: RotationSettings::default(),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Load configuration from environment, reading a `.env` file first if
    /// one is present
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let env = Environment::from_env();
        let config = match env {
            Environment::Development => Self {
                jwt: JwtConfig::from_env(),
                ..Self::development()
            },
            Environment::Production => Self::production(),
            Environment::Staging => Self {
                environment: Environment::Staging,
                jwt: JwtConfig::from_env(),
                rotation: RotationSettings::default(),
                logging: LoggingConfig::for_environment(Environment::Staging),
            },
        };

        if config.environment.is_production() && config.jwt.is_using_default_secret() {
            tracing::warn!("JWT secrets are using built-in defaults in production");
        }

        config
    }
}

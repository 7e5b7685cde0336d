//! Token signing and rotation configuration

use serde::{Deserialize, Serialize};

const DEFAULT_ACCESS_SECRET: &str = "access-secret-change-in-production";
const DEFAULT_REFRESH_SECRET: &str = "refresh-secret-change-in-production";

/// JWT signing configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret (or PEM key) used to sign access tokens
    pub access_secret: String,

    /// Secret (or PEM key) used to sign refresh tokens
    pub refresh_secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,

    /// Algorithm for JWT signing (default: HS256)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// JWT issuer claim
    #[serde(default)]
    pub issuer: Option<String>,

    /// JWT audience claim
    #[serde(default)]
    pub audience: Option<String>,

    /// Clock skew tolerated when checking `exp` and `nbf`, in seconds
    #[serde(default)]
    pub leeway_seconds: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            access_secret: String::from(DEFAULT_ACCESS_SECRET),
            refresh_secret: String::from(DEFAULT_REFRESH_SECRET),
            access_token_expiry: 900,     // 15 minutes
            refresh_token_expiry: 604800, // 7 days
            algorithm: default_algorithm(),
            issuer: None,
            audience: None,
            leeway_seconds: 0,
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with the given secrets
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }

    /// Set the signing algorithm name (e.g. `HS512`, `RS256`)
    pub fn with_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = algorithm.into();
        self
    }

    /// Set the issuer claim written into and required from tokens
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Set the audience claim written into and required from tokens
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    /// Check if either secret is still a built-in default (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.access_secret == DEFAULT_ACCESS_SECRET || self.refresh_secret == DEFAULT_REFRESH_SECRET
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary key lookup, falling back to defaults for
    /// missing or unparsable values
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let parsed = |key: &str, fallback: i64| {
            lookup(key)
                .and_then(|value| value.trim().parse().ok())
                .unwrap_or(fallback)
        };

        Self {
            access_secret: lookup("JWT_ACCESS_SECRET").unwrap_or(defaults.access_secret),
            refresh_secret: lookup("JWT_REFRESH_SECRET").unwrap_or(defaults.refresh_secret),
            access_token_expiry: parsed("JWT_ACCESS_TOKEN_EXPIRY", defaults.access_token_expiry),
            refresh_token_expiry: parsed("JWT_REFRESH_TOKEN_EXPIRY", defaults.refresh_token_expiry),
            algorithm: lookup("JWT_ALGORITHM").unwrap_or(defaults.algorithm),
            issuer: lookup("JWT_ISSUER"),
            audience: lookup("JWT_AUDIENCE"),
            leeway_seconds: lookup("JWT_LEEWAY")
                .and_then(|value| value.trim().parse().ok())
                .unwrap_or(defaults.leeway_seconds),
        }
    }
}

/// Refresh token rotation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct RotationSettings {
    /// Sign rotated access tokens with the access secret instead of the
    /// refresh secret
    #[serde(default = "default_true")]
    pub separate_access_secret: bool,

    /// Issue a fresh refresh token alongside the new access token
    #[serde(default = "default_true")]
    pub reissue_refresh: bool,
}

impl Default for RotationSettings {
    fn default() -> Self {
        Self {
            separate_access_secret: true,
            reissue_refresh: true,
        }
    }
}

impl RotationSettings {
    /// Settings reproducing single-secret rotation: the new access token is
    /// signed with the refresh secret and no refresh token is reissued
    pub fn single_secret() -> Self {
        Self {
            separate_access_secret: false,
            reissue_refresh: false,
        }
    }
}

fn default_algorithm() -> String {
    String::from("HS256")
}

fn default_true() -> bool {
    true
}

//! Configuration for the token service

use std::str::FromStr;

use jsonwebtoken::Algorithm;
use tw_shared::config::{AppConfig, JwtConfig, RotationSettings};

use crate::domain::entities::token::{Payload, SignOptions, TokenRequest, VerifyOptions};
use crate::errors::{DomainError, ValidationError};

use super::rotation::{AccessPayload, RotationConfig};

/// Typed token settings, derived from [`JwtConfig`]
#[derive(Clone, PartialEq)]
pub struct TokenServiceConfig {
    /// Secret for access tokens
    pub access_secret: String,
    /// Secret for refresh tokens
    pub refresh_secret: String,
    /// JWT signing algorithm
    pub algorithm: Algorithm,
    /// Access token lifetime in seconds
    pub access_token_expiry_seconds: i64,
    /// Refresh token lifetime in seconds
    pub refresh_token_expiry_seconds: i64,
    /// `iss` written into and required from tokens
    pub issuer: Option<String>,
    /// `aud` written into and required from tokens
    pub audience: Option<String>,
    /// Clock skew tolerated during verification
    pub leeway_seconds: u64,
    /// Rotation behaviour
    pub rotation: RotationSettings,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        let jwt = JwtConfig::default();
        Self {
            access_secret: jwt.access_secret,
            refresh_secret: jwt.refresh_secret,
            algorithm: Algorithm::HS256,
            access_token_expiry_seconds: jwt.access_token_expiry,
            refresh_token_expiry_seconds: jwt.refresh_token_expiry,
            issuer: jwt.issuer,
            audience: jwt.audience,
            leeway_seconds: jwt.leeway_seconds,
            rotation: RotationSettings::default(),
        }
    }
}

impl TokenServiceConfig {
    /// Builds the typed configuration, validating the algorithm name
    pub fn from_jwt_config(jwt: &JwtConfig, rotation: RotationSettings) -> Result<Self, DomainError> {
        let algorithm = Algorithm::from_str(jwt.algorithm.trim()).map_err(|_| {
            ValidationError::UnsupportedAlgorithm {
                name: jwt.algorithm.clone(),
            }
        })?;

        Ok(Self {
            access_secret: jwt.access_secret.clone(),
            refresh_secret: jwt.refresh_secret.clone(),
            algorithm,
            access_token_expiry_seconds: jwt.access_token_expiry,
            refresh_token_expiry_seconds: jwt.refresh_token_expiry,
            issuer: jwt.issuer.clone(),
            audience: jwt.audience.clone(),
            leeway_seconds: jwt.leeway_seconds,
            rotation,
        })
    }

    pub fn from_app_config(config: &AppConfig) -> Result<Self, DomainError> {
        Self::from_jwt_config(&config.jwt, config.rotation)
    }

    fn sign_options(&self, expiry_seconds: i64) -> SignOptions {
        let mut options = SignOptions::new()
            .with_algorithm(self.algorithm)
            .expires_in(expiry_seconds);
        options.issuer = self.issuer.clone();
        options.audience = self.audience.clone();
        options
    }

    pub fn access_sign_options(&self) -> SignOptions {
        self.sign_options(self.access_token_expiry_seconds)
    }

    pub fn refresh_sign_options(&self) -> SignOptions {
        self.sign_options(self.refresh_token_expiry_seconds)
    }

    /// Verification options matching the tokens this configuration signs
    pub fn verify_options(&self) -> VerifyOptions {
        let mut options = VerifyOptions::new()
            .with_algorithms([self.algorithm])
            .with_leeway(self.leeway_seconds);
        options.issuer = self.issuer.clone();
        options.audience = self.audience.clone();
        options
    }

    pub fn access_request(&self, payload: Payload) -> TokenRequest {
        TokenRequest::new(payload, self.access_secret.clone()).with_options(self.access_sign_options())
    }

    pub fn refresh_request(&self, payload: Payload) -> TokenRequest {
        TokenRequest::new(payload, self.refresh_secret.clone())
            .with_options(self.refresh_sign_options())
    }

    /// Rotation configuration following [`RotationSettings`]
    pub fn rotation_config(&self, access_payload: AccessPayload) -> RotationConfig {
        let mut config = RotationConfig::new(self.refresh_secret.clone())
            .with_access_payload(access_payload)
            .with_access_options(self.access_sign_options())
            .with_refresh_verify(self.verify_options());

        if self.rotation.separate_access_secret {
            config = config.with_access_secret(self.access_secret.clone());
        }
        if self.rotation.reissue_refresh {
            config = config.reissue_refresh(self.refresh_sign_options());
        }
        config
    }
}

impl std::fmt::Debug for TokenServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenServiceConfig")
            .field("access_secret", &"<redacted>")
            .field("refresh_secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("access_token_expiry_seconds", &self.access_token_expiry_seconds)
            .field("refresh_token_expiry_seconds", &self.refresh_token_expiry_seconds)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("leeway_seconds", &self.leeway_seconds)
            .field("rotation", &self.rotation)
            .finish()
    }
}

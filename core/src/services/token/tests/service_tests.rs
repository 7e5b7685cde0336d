//! Unit tests for token service

use chrono::Utc;
use serde_json::json;

use crate::domain::entities::token::{Credentials, SignOptions, TokenRequest, VerifyOptions};
use crate::errors::{DomainError, TokenError};
use crate::repositories::{InMemoryRevocationStore, RevocationStore};
use crate::services::token::TokenService;

use super::mocks::{create_test_service, payload, BrokenCodec};

fn access_request(secret: &str) -> TokenRequest {
    TokenRequest::new(payload(json!({"userId": "123"})), secret)
        .with_options(SignOptions::new().expires_in("1h"))
}

#[test]
fn test_issue_and_verify_round_trip() {
    let service = create_test_service();

    let pair = service.issue(&access_request("secret"), None).unwrap();
    assert!(pair.refresh_token.is_none());

    let claims = service.verify(&pair.access_token, "secret").unwrap();
    assert_eq!(claims.get("userId"), Some(&json!("123")));

    let iat = claims.get("iat").and_then(|v| v.as_i64()).unwrap();
    let exp = claims.get("exp").and_then(|v| v.as_i64()).unwrap();
    assert_eq!(exp - iat, 3600);
    assert!((iat - Utc::now().timestamp()).abs() <= 5);
    assert_eq!(claims.len(), 3);
}

#[test]
fn test_issue_with_refresh_token() {
    let service = create_test_service();
    let refresh = TokenRequest::new(payload(json!({"userId": "123"})), "refresh-secret")
        .with_options(SignOptions::new().expires_in("7d"));

    let pair = service
        .issue(&access_request("access-secret"), Some(&refresh))
        .unwrap();

    let refresh_token = pair.refresh_token.unwrap();
    let claims = service.verify(&refresh_token, "refresh-secret").unwrap();
    let iat = claims["iat"].as_i64().unwrap();
    assert_eq!(claims["exp"].as_i64().unwrap() - iat, 7 * 86400);

    assert!(service.verify(&refresh_token, "access-secret").is_err());
}

#[test]
fn test_verify_with_wrong_secret() {
    let service = create_test_service();
    let pair = service.issue(&access_request("secret"), None).unwrap();

    let result = service.verify(&pair.access_token, "not-the-secret");

    assert_eq!(
        result.unwrap_err(),
        DomainError::Token(TokenError::rejected("invalid signature"))
    );

    let outcome = service.authenticate(&Credentials::new(pair.access_token), "not-the-secret");
    assert!(!outcome.is_authenticated);
    assert_eq!(outcome.status, 401);
    assert_eq!(outcome.error.as_deref(), Some("invalid signature"));
    assert!(outcome.payload.is_none());
}

#[test]
fn test_verify_malformed_token() {
    let service = create_test_service();

    let result = service.verify("invalid_token", "secret");

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::Rejected { ref message })) if message == "jwt malformed"
    ));
}

#[test]
fn test_verify_expired_token() {
    let service = create_test_service();
    let request = TokenRequest::new(payload(json!({"userId": "123"})), "secret")
        .with_options(SignOptions::new().expires_in(-60i64));
    let pair = service.issue(&request, None).unwrap();

    let result = service.verify(&pair.access_token, "secret");
    assert_eq!(
        result.unwrap_err(),
        DomainError::Token(TokenError::rejected("jwt expired"))
    );

    let lenient = VerifyOptions::new().ignoring_expiration();
    assert!(service.verify_with(&pair.access_token, "secret", &lenient).is_ok());
}

#[test]
fn test_verify_not_yet_valid_token() {
    let service = create_test_service();
    let request = TokenRequest::new(payload(json!({"userId": "123"})), "secret")
        .with_options(SignOptions::new().not_before("1h"));
    let pair = service.issue(&request, None).unwrap();

    let result = service.verify(&pair.access_token, "secret");
    assert_eq!(
        result.unwrap_err(),
        DomainError::Token(TokenError::rejected("jwt not active"))
    );
}

#[test]
fn test_authenticate_success() {
    let service = create_test_service();
    let pair = service.issue(&access_request("secret"), None).unwrap();

    let outcome = service.authenticate(&Credentials::from(pair), "secret");

    assert!(outcome.is_authenticated);
    assert_eq!(outcome.status, 200);
    assert!(outcome.error.is_none());
    assert_eq!(outcome.payload.unwrap()["userId"], json!("123"));
}

#[test]
fn test_issue_outcome_reports_generation_failure() {
    let service = create_test_service();
    let request = TokenRequest::new(payload(json!({"userId": "123"})), "secret")
        .with_options(SignOptions::new().expires_in("eventually"));

    let outcome = service.issue_outcome(&request, None);

    assert!(!outcome.is_success());
    assert_eq!(outcome.status, 500);
    assert_eq!(outcome.error.as_deref(), Some("Token generation failed"));
    assert!(outcome.access_token.is_none());
}

#[test]
fn test_issue_fails_when_refresh_signing_fails() {
    let service = create_test_service();
    let refresh = TokenRequest::new(payload(json!({"userId": "123"})), "");

    let result = service.issue(&access_request("secret"), Some(&refresh));

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::GenerationFailed { .. }))
    ));
}

#[test]
fn test_unexpected_codec_errors() {
    let service = TokenService::with_codec(InMemoryRevocationStore::new(), BrokenCodec);

    let outcome = service.issue_outcome(&access_request("secret"), None);
    assert_eq!(outcome.status, 500);
    assert_eq!(outcome.error.as_deref(), Some("An unexpected error occurred"));

    let auth = service.authenticate(&Credentials::new("a.b.c"), "secret");
    assert!(!auth.is_authenticated);
    assert_eq!(auth.status, 500);
    assert_eq!(auth.error.as_deref(), Some("An unexpected error occurred"));
}

#[test]
fn test_revoke_and_is_revoked() {
    let service = create_test_service();
    let first = service.issue(&access_request("secret"), None).unwrap().access_token;
    let other = TokenRequest::new(payload(json!({"userId": "456"})), "secret");
    let second = service.issue(&other, None).unwrap().access_token;

    assert!(!service.is_revoked(&first));

    service.revoke(&first);

    assert!(service.is_revoked(&first));
    assert!(!service.is_revoked(&second));
    assert_eq!(service.store().len(), 1);
}

#[test]
fn test_revoke_many() {
    let service = create_test_service();
    service.revoke_many(["a", "b", "c"]);

    assert!(service.is_revoked("a"));
    assert!(service.is_revoked("c"));
    assert!(!service.is_revoked("d"));
    assert_eq!(service.store().len(), 3);
}

#[test]
fn test_revoked_token_still_verifies_but_is_not_active() {
    let service = create_test_service();
    let token = service.issue(&access_request("secret"), None).unwrap().access_token;
    service.revoke(&token);

    assert!(service.verify(&token, "secret").is_ok());
    assert_eq!(
        service
            .verify_active(&token, "secret", &VerifyOptions::default())
            .unwrap_err(),
        DomainError::Token(TokenError::Revoked)
    );
}

#[test]
fn test_independent_services_do_not_share_revocations() {
    let first = create_test_service();
    let second = create_test_service();

    first.revoke("token");

    assert!(first.is_revoked("token"));
    assert!(!second.is_revoked("token"));
}

#[test]
fn test_issuer_and_audience_checks() {
    let service = create_test_service();
    let request = TokenRequest::new(payload(json!({"userId": "123"})), "secret").with_options(
        SignOptions::new()
            .expires_in("15m")
            .with_issuer("tokenward")
            .with_audience("api"),
    );
    let token = service.issue(&request, None).unwrap().access_token;

    let matching = VerifyOptions::new().with_issuer("tokenward").with_audience("api");
    assert!(service.verify_with(&token, "secret", &matching).is_ok());

    let wrong_issuer = VerifyOptions::new().with_issuer("someone-else");
    assert_eq!(
        service.verify_with(&token, "secret", &wrong_issuer).unwrap_err(),
        DomainError::Token(TokenError::rejected("jwt issuer invalid"))
    );

    let wrong_audience = VerifyOptions::new().with_audience("web");
    assert_eq!(
        service.verify_with(&token, "secret", &wrong_audience).unwrap_err(),
        DomainError::Token(TokenError::rejected("jwt audience invalid"))
    );
}

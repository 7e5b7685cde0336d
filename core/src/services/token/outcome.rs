//! Status-carrying results for callers that inspect a status code instead of
//! handling `Result`s

use serde::{Deserialize, Serialize};
use tw_shared::errors::status_codes;

use crate::domain::entities::token::{Payload, TokenPair};
use crate::errors::DomainResult;

/// Result of issuing tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IssueOutcome {
    pub fn is_success(&self) -> bool {
        self.status == status_codes::OK
    }
}

impl From<DomainResult<TokenPair>> for IssueOutcome {
    fn from(result: DomainResult<TokenPair>) -> Self {
        match result {
            Ok(pair) => Self {
                access_token: Some(pair.access_token),
                refresh_token: pair.refresh_token,
                status: status_codes::OK,
                error: None,
            },
            Err(e) => Self {
                access_token: None,
                refresh_token: None,
                status: e.status_code(),
                error: Some(e.public_message()),
            },
        }
    }
}

/// Result of authenticating a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthOutcome {
    pub is_authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<DomainResult<Payload>> for AuthOutcome {
    fn from(result: DomainResult<Payload>) -> Self {
        match result {
            Ok(payload) => Self {
                is_authenticated: true,
                payload: Some(payload),
                status: status_codes::OK,
                error: None,
            },
            Err(e) => Self {
                is_authenticated: false,
                payload: None,
                status: e.status_code(),
                error: Some(e.public_message()),
            },
        }
    }
}

/// Result of rotating a refresh token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RefreshOutcome {
    pub fn is_success(&self) -> bool {
        self.status == status_codes::OK
    }
}

impl From<DomainResult<TokenPair>> for RefreshOutcome {
    fn from(result: DomainResult<TokenPair>) -> Self {
        let IssueOutcome {
            access_token,
            refresh_token,
            status,
            error,
        } = IssueOutcome::from(result);
        Self {
            access_token,
            refresh_token,
            status,
            error,
        }
    }
}

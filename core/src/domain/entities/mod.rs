//! Domain entities

pub mod token;

pub use token::{
    payload_from, strip_claims_set_by, strip_timing_claims, Credentials, Payload, SignOptions,
    TokenPair, TokenRequest, VerifyOptions, CLAIM_EXP, CLAIM_IAT, CLAIM_JTI, CLAIM_NBF, TIMING_CLAIMS,
};

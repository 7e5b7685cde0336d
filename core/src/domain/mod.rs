//! Domain layer: token entities and value objects.

pub mod entities;
pub mod value_objects;

pub use entities::{
    payload_from, strip_claims_set_by, strip_timing_claims, Credentials, Payload, SignOptions,
    TokenPair, TokenRequest, VerifyOptions, CLAIM_EXP, CLAIM_IAT, CLAIM_JTI, CLAIM_NBF, TIMING_CLAIMS,
};
pub use value_objects::Timespan;

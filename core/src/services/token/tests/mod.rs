//! Tests for the token service

mod mocks;
mod service_tests;

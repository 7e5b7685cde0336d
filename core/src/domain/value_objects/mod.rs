//! Value objects for the token domain

pub mod timespan;

pub use timespan::Timespan;

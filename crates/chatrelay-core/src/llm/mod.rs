//! Completion service abstraction.

pub mod client;

//! Storage abstractions for chatrelay.
//!
//! Implementations live in chatrelay-infra.

pub mod conversation_store;

//! Conversation store implementations.

pub mod memory;
pub mod redis_store;

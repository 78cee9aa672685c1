//! Shared domain and wire types for chatrelay.
//!
//! This crate contains the conversation turn model, the Telegram and
//! completion-service payloads, configuration types, and the error enums
//! shared by the port traits in `chatrelay-core`.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod chat;
pub mod completion;
pub mod config;
pub mod error;
pub mod telegram;
pub mod turn;

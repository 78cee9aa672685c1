//! Infrastructure layer for chatrelay.
//!
//! Contains implementations of the port traits defined in `chatrelay-core`:
//! Redis and in-memory conversation stores, the OpenAI chat-completion
//! client, the Telegram Bot API client, and the config file loader.

pub mod config;
pub mod llm;
pub mod store;
pub mod telegram;

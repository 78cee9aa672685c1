//! Relay workflow and port trait definitions for chatrelay.
//!
//! This crate defines the "ports" (store, completion and chat platform
//! traits) that the infrastructure layer implements, plus the
//! [`relay::service::RelayService`] that composes them per inbound update.
//! It depends only on `chatrelay-types` -- never on `chatrelay-infra` or any
//! network crate.

pub mod llm;
pub mod platform;
pub mod relay;
pub mod storage;

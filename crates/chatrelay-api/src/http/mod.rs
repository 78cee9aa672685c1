//! HTTP layer for chatrelay.
//!
//! Axum-based server exposing the Telegram webhook and a health check.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;

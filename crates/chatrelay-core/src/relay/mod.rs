//! Per-update relay workflow: command classification and the service that
//! ties the store, completion client and chat platform together.

pub mod command;
pub mod service;

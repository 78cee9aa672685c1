//! Chat-completion request/response payloads.
//!
//! Only the fields the relay reads or writes are modelled; everything else
//! in the provider's response is ignored during deserialization.

use serde::{Deserialize, Serialize};

use crate::turn::Turn;

/// Request body for `POST /chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [Turn],
}

/// Response body of a chat completion.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// A single candidate reply.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: Turn,
}

impl CompletionResponse {
    /// Candidate replies in the order the provider returned them.
    pub fn into_candidates(self) -> Vec<Turn> {
        self.choices.into_iter().map(|c| c.message).collect()
    }
}

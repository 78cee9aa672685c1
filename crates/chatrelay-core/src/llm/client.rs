//! CompletionClient trait definition.

use chatrelay_types::error::CompletionError;
use chatrelay_types::turn::Turn;

/// Trait for chat-completion backends.
///
/// Stateless between calls: everything the model should see is passed in
/// `turns`. Implementations live in chatrelay-infra (e.g.,
/// `OpenAiCompletionClient`).
pub trait CompletionClient: Send + Sync {
    /// Submit the conversation and return the candidate replies.
    ///
    /// An empty vector is a valid, non-error result.
    fn complete(
        &self,
        turns: &[Turn],
    ) -> impl std::future::Future<Output = Result<Vec<Turn>, CompletionError>> + Send;
}

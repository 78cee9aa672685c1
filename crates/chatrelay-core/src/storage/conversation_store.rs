//! Conversation store trait.
//!
//! Defines the interface for per-chat turn history.
//! Implementations live in chatrelay-infra.

use chatrelay_types::chat::ChatId;
use chatrelay_types::error::RepositoryError;
use chatrelay_types::turn::Turn;

/// Trait for per-chat, append-only conversation history.
///
/// Each chat owns one ordered sequence of turns. The sequence has no size
/// bound and no TTL; it only shrinks when cleared. No atomicity is promised
/// across a `fetch` followed by an `append`.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait ConversationStore: Send + Sync {
    /// Get every turn for a chat in append order. Empty if none exist.
    fn fetch(
        &self,
        chat_id: ChatId,
    ) -> impl std::future::Future<Output = Result<Vec<Turn>, RepositoryError>> + Send;

    /// Append turns to the end of a chat's history, preserving their order.
    fn append(
        &self,
        chat_id: ChatId,
        turns: &[Turn],
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Remove a chat's entire history. No-op if there is none.
    fn clear(
        &self,
        chat_id: ChatId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}

/// Build the store key for a chat: `<prefix>:<chat_id>`.
pub fn history_key(prefix: &str, chat_id: ChatId) -> String {
    format!("{prefix}:{chat_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_key_format() {
        assert_eq!(history_key("userHistory", ChatId(12345)), "userHistory:12345");
        assert_eq!(history_key("h", ChatId(-1001)), "h:-1001");
    }
}

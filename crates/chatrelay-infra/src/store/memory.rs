//! In-process conversation store.
//!
//! Keeps every chat's history in a [`DashMap`]. History does not survive a
//! restart; useful for local runs without Redis and for tests.

use chatrelay_core::storage::conversation_store::ConversationStore;
use chatrelay_types::chat::ChatId;
use chatrelay_types::error::RepositoryError;
use chatrelay_types::turn::Turn;
use dashmap::DashMap;

/// `DashMap`-backed implementation of `ConversationStore`.
#[derive(Debug, Default)]
pub struct InMemoryConversationStore {
    chats: DashMap<ChatId, Vec<Turn>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of chats with stored history.
    pub fn chat_count(&self) -> usize {
        self.chats.len()
    }
}

impl ConversationStore for InMemoryConversationStore {
    async fn fetch(&self, chat_id: ChatId) -> Result<Vec<Turn>, RepositoryError> {
        Ok(self
            .chats
            .get(&chat_id)
            .map(|turns| turns.value().clone())
            .unwrap_or_default())
    }

    async fn append(&self, chat_id: ChatId, turns: &[Turn]) -> Result<(), RepositoryError> {
        if turns.is_empty() {
            return Ok(());
        }
        self.chats
            .entry(chat_id)
            .or_default()
            .extend_from_slice(turns);
        Ok(())
    }

    async fn clear(&self, chat_id: ChatId) -> Result<(), RepositoryError> {
        self.chats.remove(&chat_id);
        Ok(())
    }
}

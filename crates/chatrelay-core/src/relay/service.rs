//! Relay service handling one inbound update end to end.
//!
//! RelayService coordinates the ConversationStore, CompletionClient and
//! ChatPlatform: classify the text, read history, ask for a completion,
//! persist the exchange and send exactly one reply back to the chat.

use chatrelay_types::chat::ChatId;
use chatrelay_types::config::ReplyMessages;
use chatrelay_types::error::RepositoryError;
use chatrelay_types::telegram::Update;
use chatrelay_types::turn::Turn;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::llm::client::CompletionClient;
use crate::platform::ChatPlatform;
use crate::relay::command::Command;
use crate::storage::conversation_store::ConversationStore;

/// Failures that abort handling of an update.
///
/// Completion failures degrade to the fallback reply and send failures are
/// reported as [`RelayOutcome::Undelivered`], so only the store is listed.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("conversation store failed: {0}")]
    Store(#[from] RepositoryError),
}

/// Which path produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    Welcome,
    Cleared,
    Completion,
    Fallback,
}

impl ReplyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplyKind::Welcome => "welcome",
            ReplyKind::Cleared => "cleared",
            ReplyKind::Completion => "completion",
            ReplyKind::Fallback => "fallback",
        }
    }
}

/// The message sent back to a chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub chat_id: ChatId,
    pub text: String,
    pub kind: ReplyKind,
}

/// Result of handling one update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    /// No text to act on; nothing was sent.
    Ignored,
    /// A reply was delivered to the chat.
    Replied(Reply),
    /// A reply was produced (and history persisted) but the platform did not
    /// accept it.
    Undelivered { reply: Reply, error: String },
}

/// Relays chat messages to the completion service and back.
///
/// Generic over the three ports to keep chatrelay-core free of network
/// crates. One instance is shared by all concurrent requests.
pub struct RelayService<S: ConversationStore, C: CompletionClient, P: ChatPlatform> {
    store: S,
    completion: C,
    platform: P,
    messages: ReplyMessages,
}

impl<S: ConversationStore, C: CompletionClient, P: ChatPlatform> RelayService<S, C, P> {
    /// Create a new relay over the given ports.
    pub fn new(store: S, completion: C, platform: P, messages: ReplyMessages) -> Self {
        Self {
            store,
            completion,
            platform,
            messages,
        }
    }

    /// Access the conversation store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Access the chat platform client.
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Handle one inbound update.
    ///
    /// Updates without text (or without a chat) are ignored. Every other
    /// update results in exactly one `send_message` call. A failed send is
    /// logged and returned as `Undelivered`; it does not undo the stored
    /// exchange.
    pub async fn handle_update(&self, update: &Update) -> Result<RelayOutcome, RelayError> {
        let text = update.text();
        let chat_id = match update.chat_id() {
            Some(chat_id) if !text.is_empty() => chat_id,
            _ => {
                debug!(update_id = update.update_id, "Update has no text, ignoring");
                return Ok(RelayOutcome::Ignored);
            }
        };

        let reply = self.reply_for(chat_id, text).await?;

        if let Err(e) = self.platform.send_message(chat_id, &reply.text).await {
            error!(chat_id = %chat_id, kind = reply.kind.as_str(), error = %e, "Failed to send reply");
            return Ok(RelayOutcome::Undelivered {
                reply,
                error: e.to_string(),
            });
        }

        info!(chat_id = %chat_id, kind = reply.kind.as_str(), "Reply sent");
        Ok(RelayOutcome::Replied(reply))
    }

    async fn reply_for(&self, chat_id: ChatId, text: &str) -> Result<Reply, RelayError> {
        match Command::parse(text) {
            Command::Start => Ok(self.reply(chat_id, self.messages.welcome.clone(), ReplyKind::Welcome)),
            Command::Clear => {
                self.store.clear(chat_id).await?;
                info!(chat_id = %chat_id, "Conversation history cleared");
                Ok(self.reply(chat_id, self.messages.cleared.clone(), ReplyKind::Cleared))
            }
            Command::Message(text) => self.relay_message(chat_id, text).await,
        }
    }

    /// Send history plus the new user turn to the completion service and
    /// persist the exchange when a candidate comes back.
    async fn relay_message(&self, chat_id: ChatId, text: &str) -> Result<Reply, RelayError> {
        let mut turns = self.store.fetch(chat_id).await?;
        let user_turn = Turn::user(text);
        turns.push(user_turn.clone());

        debug!(chat_id = %chat_id, turns = turns.len(), "Requesting completion");

        let candidates = match self.completion.complete(&turns).await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(chat_id = %chat_id, error = %e, "Completion request failed");
                Vec::new()
            }
        };

        let Some(candidate) = candidates.into_iter().next() else {
            warn!(chat_id = %chat_id, "Completion returned no candidates, sending fallback");
            return Ok(self.reply(chat_id, self.messages.fallback.clone(), ReplyKind::Fallback));
        };

        let text = candidate.content().to_string();
        self.store.append(chat_id, &[user_turn, candidate]).await?;

        Ok(self.reply(chat_id, text, ReplyKind::Completion))
    }

    fn reply(&self, chat_id: ChatId, text: String, kind: ReplyKind) -> Reply {
        Reply { chat_id, text, kind }
    }
}

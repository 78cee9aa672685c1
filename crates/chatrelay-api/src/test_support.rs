//! Test doubles for driving the router without network access.

use std::sync::{Arc, Mutex};

use chatrelay_core::llm::client::CompletionClient;
use chatrelay_core::platform::ChatPlatform;
use chatrelay_infra::store::memory::InMemoryConversationStore;
use chatrelay_types::chat::ChatId;
use chatrelay_types::config::ReplyMessages;
use chatrelay_types::error::{ChatPlatformError, CompletionError};
use chatrelay_types::turn::Turn;

use crate::state::AppState;

pub type TestState = AppState<InMemoryConversationStore, StaticCompletion, RecordingPlatform>;

/// Completion client that always answers with the same candidates.
pub struct StaticCompletion {
    candidates: Vec<Turn>,
}

impl CompletionClient for StaticCompletion {
    async fn complete(&self, _turns: &[Turn]) -> Result<Vec<Turn>, CompletionError> {
        Ok(self.candidates.clone())
    }
}

/// Platform that records sent messages and webhook registrations. Clones
/// share the recording.
#[derive(Clone, Default)]
pub struct RecordingPlatform {
    sent: Arc<Mutex<Vec<(ChatId, String)>>>,
    webhooks: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl RecordingPlatform {
    pub fn sent(&self) -> Vec<(ChatId, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn webhooks(&self) -> Vec<String> {
        self.webhooks.lock().unwrap().clone()
    }
}

impl ChatPlatform for RecordingPlatform {
    async fn send_message(&self, chat_id: ChatId, text: &str) -> Result<(), ChatPlatformError> {
        if self.fail {
            return Err(ChatPlatformError::Rejected("Bad Request: chat not found".to_string()));
        }
        self.sent.lock().unwrap().push((chat_id, text.to_string()));
        Ok(())
    }

    async fn set_webhook(&self, url: &str) -> Result<(), ChatPlatformError> {
        self.webhooks.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

/// State over an in-memory store and a completion client returning `candidates`.
pub fn test_state(candidates: Vec<Turn>) -> (TestState, RecordingPlatform) {
    let platform = RecordingPlatform::default();
    let state = AppState::new(
        InMemoryConversationStore::new(),
        StaticCompletion { candidates },
        platform.clone(),
        ReplyMessages::default(),
    );
    (state, platform)
}

/// State whose platform rejects every message.
pub fn failing_platform_state(candidates: Vec<Turn>) -> TestState {
    AppState::new(
        InMemoryConversationStore::new(),
        StaticCompletion { candidates },
        RecordingPlatform {
            fail: true,
            ..Default::default()
        },
        ReplyMessages::default(),
    )
}

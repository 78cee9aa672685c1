//! Application state wiring the relay together.
//!
//! AppState holds the one `RelayService` shared by every request. It stays
//! generic over the ports so the router can be driven by test doubles;
//! `main` pins it to the Redis or in-memory store and the real HTTP clients.

use std::sync::Arc;
use std::time::Duration;

use chatrelay_core::llm::client::CompletionClient;
use chatrelay_core::platform::ChatPlatform;
use chatrelay_core::relay::service::RelayService;
use chatrelay_core::storage::conversation_store::ConversationStore;
use chatrelay_infra::llm::openai::OpenAiCompletionClient;
use chatrelay_infra::telegram::TelegramBotClient;
use chatrelay_types::config::{RelayConfig, ReplyMessages};
use chatrelay_types::error::{ChatPlatformError, CompletionError};
use secrecy::SecretString;

/// Shared application state handed to axum handlers.
pub struct AppState<S: ConversationStore, C: CompletionClient, P: ChatPlatform> {
    pub relay: Arc<RelayService<S, C, P>>,
}

// Manual impl: cloning only bumps the Arc, the ports need not be Clone.
impl<S: ConversationStore, C: CompletionClient, P: ChatPlatform> Clone for AppState<S, C, P> {
    fn clone(&self) -> Self {
        Self {
            relay: Arc::clone(&self.relay),
        }
    }
}

impl<S: ConversationStore, C: CompletionClient, P: ChatPlatform> AppState<S, C, P> {
    pub fn new(store: S, completion: C, platform: P, messages: ReplyMessages) -> Self {
        Self {
            relay: Arc::new(RelayService::new(store, completion, platform, messages)),
        }
    }
}

/// Build the OpenAI client from the API key and config tunables.
pub fn completion_client(
    api_key: &str,
    config: &RelayConfig,
) -> Result<OpenAiCompletionClient, CompletionError> {
    Ok(OpenAiCompletionClient::new(
        SecretString::from(api_key.to_string()),
        config.model.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )?
    .with_base_url(config.completion_base_url.clone()))
}

/// Build the Telegram client from the bot token and config tunables.
pub fn telegram_client(
    token: &str,
    config: &RelayConfig,
) -> Result<TelegramBotClient, ChatPlatformError> {
    Ok(TelegramBotClient::new(
        SecretString::from(token.to_string()),
        Duration::from_secs(config.request_timeout_secs),
    )?
    .with_base_url(config.telegram_base_url.clone()))
}

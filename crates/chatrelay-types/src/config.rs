//! Relay configuration types.
//!
//! `RelayConfig` represents the optional `chatrelay.toml` holding tunables
//! that are not secrets: model, endpoints, store selection and reply texts.
//! Credentials come from the command line or environment instead.

use serde::{Deserialize, Serialize};

/// Top-level relay configuration. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Completion model identifier.
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the OpenAI-compatible completion API.
    #[serde(default = "default_completion_base_url")]
    pub completion_base_url: String,

    /// Base URL of the Telegram Bot API.
    #[serde(default = "default_telegram_base_url")]
    pub telegram_base_url: String,

    /// Redis connection URL. The password is supplied separately.
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// Prefix of the per-chat history key (`<prefix>:<chat_id>`).
    #[serde(default = "default_history_key_prefix")]
    pub history_key_prefix: String,

    /// Timeout applied to every outbound HTTP request, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Which conversation store backs the relay.
    #[serde(default)]
    pub store: StoreBackend,

    /// Static reply texts.
    #[serde(default)]
    pub messages: ReplyMessages,
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_completion_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_telegram_base_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_redis_url() -> String {
    "redis://redis:6379/0".to_string()
}

fn default_history_key_prefix() -> String {
    "userHistory".to_string()
}

fn default_request_timeout_secs() -> u64 {
    120
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            completion_base_url: default_completion_base_url(),
            telegram_base_url: default_telegram_base_url(),
            redis_url: default_redis_url(),
            history_key_prefix: default_history_key_prefix(),
            request_timeout_secs: default_request_timeout_secs(),
            store: StoreBackend::default(),
            messages: ReplyMessages::default(),
        }
    }
}

/// Conversation store implementation to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Redis,
    /// Process-local store; history is lost on restart.
    Memory,
}

/// Texts sent for the control commands and the completion fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyMessages {
    #[serde(default = "default_welcome")]
    pub welcome: String,
    #[serde(default = "default_cleared")]
    pub cleared: String,
    #[serde(default = "default_fallback")]
    pub fallback: String,
}

fn default_welcome() -> String {
    "Welcome, You can start chatting with Haj Jipit.".to_string()
}

fn default_cleared() -> String {
    "Conversation cleared.".to_string()
}

fn default_fallback() -> String {
    "There was a problem processing your message. Maybe it's because of number of tokens. \
     Try to /CLEAR your conversation history."
        .to_string()
}

impl Default for ReplyMessages {
    fn default() -> Self {
        Self {
            welcome: default_welcome(),
            cleared: default_cleared(),
            fallback: default_fallback(),
        }
    }
}

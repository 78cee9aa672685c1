//! Telegram Bot API client.
//!
//! Implements [`ChatPlatform`] with plain JSON `POST`s to
//! `{base_url}/bot<token>/<method>`. The bot token is part of the URL, so
//! reqwest errors are stripped of their URL before they are surfaced.

use std::time::Duration;

use chatrelay_core::platform::ChatPlatform;
use chatrelay_types::chat::ChatId;
use chatrelay_types::error::ChatPlatformError;
use chatrelay_types::telegram::{SendMessage, SetWebhook, TelegramResponse};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

/// Client for the Telegram Bot API.
pub struct TelegramBotClient {
    client: reqwest::Client,
    token: SecretString,
    base_url: String,
}

impl TelegramBotClient {
    pub fn new(token: SecretString, timeout: Duration) -> Result<Self, ChatPlatformError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChatPlatformError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            token,
            base_url: "https://api.telegram.org".to_string(),
        })
    }

    /// Override the base URL (useful for testing or a local Bot API server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.base_url.trim_end_matches('/'),
            self.token.expose_secret(),
            method
        )
    }

    async fn call<B: Serialize + Sync>(&self, method: &str, body: &B) -> Result<(), ChatPlatformError> {
        tracing::debug!(method, body = %serde_json::to_string(body).unwrap_or_default(), "Calling Bot API");

        let response = self
            .client
            .post(self.method_url(method))
            .json(body)
            .send()
            .await
            .map_err(|e| ChatPlatformError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        let envelope: TelegramResponse = response.json().await.map_err(|e| {
            ChatPlatformError::Deserialization(format!(
                "{method} returned HTTP {status} with an unreadable body: {}",
                e.without_url()
            ))
        })?;

        if !envelope.ok {
            return Err(ChatPlatformError::Rejected(
                envelope
                    .description
                    .unwrap_or_else(|| format!("{method} failed with HTTP {status}")),
            ));
        }

        Ok(())
    }
}

impl ChatPlatform for TelegramBotClient {
    async fn send_message(&self, chat_id: ChatId, text: &str) -> Result<(), ChatPlatformError> {
        self.call("sendMessage", &SendMessage { chat_id, text }).await
    }

    async fn set_webhook(&self, url: &str) -> Result<(), ChatPlatformError> {
        self.call("setWebhook", &SetWebhook { url }).await?;
        tracing::info!(url, "Webhook registered");
        Ok(())
    }
}

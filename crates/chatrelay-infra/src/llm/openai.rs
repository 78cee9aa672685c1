//! OpenAiCompletionClient -- concrete [`CompletionClient`] for the OpenAI
//! chat completions API.
//!
//! Sends `{model, messages}` to `/chat/completions` and returns every
//! `choices[i].message` as a candidate turn. Works against any
//! OpenAI-compatible endpoint via [`OpenAiCompletionClient::with_base_url`].
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use std::time::Duration;

use chatrelay_core::llm::client::CompletionClient;
use chatrelay_types::completion::{CompletionRequest, CompletionResponse};
use chatrelay_types::error::CompletionError;
use chatrelay_types::turn::Turn;
use secrecy::{ExposeSecret, SecretString};

/// OpenAI chat-completion client.
///
/// # API Key Security
///
/// The API key is stored as a [`SecretString`] and is only exposed when
/// building the `Authorization` header.
pub struct OpenAiCompletionClient {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl OpenAiCompletionClient {
    /// Create a client for `model` with a per-request `timeout`.
    pub fn new(
        api_key: SecretString,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CompletionError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CompletionError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: "https://api.openai.com/v1".to_string(),
            model: model.into(),
        })
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The model requests are sent for.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

// No Debug impl: the key must not reach log output.

impl CompletionClient for OpenAiCompletionClient {
    async fn complete(&self, turns: &[Turn]) -> Result<Vec<Turn>, CompletionError> {
        let body = CompletionRequest {
            model: &self.model,
            messages: turns,
        };

        let response = self
            .client
            .post(self.url())
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::debug!(status = %status, body = %error_body, "Completion API error response");
            return Err(match status.as_u16() {
                401 => CompletionError::AuthenticationFailed,
                429 => CompletionError::RateLimited,
                code => CompletionError::Status {
                    status: code,
                    body: error_body,
                },
            });
        }

        let raw = response
            .text()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;
        tracing::debug!(body = %raw, "Completion API response");

        let parsed: CompletionResponse = serde_json::from_str(&raw).map_err(|e| {
            CompletionError::Deserialization(format!("failed to parse response: {e}"))
        })?;

        Ok(parsed.into_candidates())
    }
}

//! ChatPlatform trait definition.
//!
//! Outbound calls to the chat platform. Implementations live in
//! chatrelay-infra (e.g., `TelegramBotClient`).

use chatrelay_types::chat::ChatId;
use chatrelay_types::error::ChatPlatformError;

pub trait ChatPlatform: Send + Sync {
    /// Post a text message to a chat.
    fn send_message(
        &self,
        chat_id: ChatId,
        text: &str,
    ) -> impl std::future::Future<Output = Result<(), ChatPlatformError>> + Send;

    /// Register the URL the platform delivers updates to.
    fn set_webhook(
        &self,
        url: &str,
    ) -> impl std::future::Future<Output = Result<(), ChatPlatformError>> + Send;
}

/// Path the relay serves updates on.
pub const WEBHOOK_PATH: &str = "/webhook";

/// Build the webhook URL to register from the externally reachable base URL.
///
/// `/webhook` is appended unless the base already ends with it.
pub fn webhook_url(base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if base.ends_with(WEBHOOK_PATH) {
        base.to_string()
    } else {
        format!("{base}{WEBHOOK_PATH}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webhook_url_appends_path() {
        assert_eq!(webhook_url("https://bot.example.com"), "https://bot.example.com/webhook");
        assert_eq!(webhook_url("https://bot.example.com/"), "https://bot.example.com/webhook");
    }

    #[test]
    fn test_webhook_url_keeps_existing_path() {
        assert_eq!(
            webhook_url("https://bot.example.com/webhook"),
            "https://bot.example.com/webhook"
        );
        assert_eq!(
            webhook_url("https://bot.example.com/webhook/"),
            "https://bot.example.com/webhook"
        );
    }
}

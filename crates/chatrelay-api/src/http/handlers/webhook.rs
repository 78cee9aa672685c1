//! Telegram webhook receiver.
//!
//! Parses the update leniently and hands it to the `RelayService`. The reply
//! to the user goes out through the Bot API, not through this response; the
//! response only tells Telegram the update was handled. Telegram redelivers
//! updates answered with a non-2xx status, so only a store failure (nothing
//! was persisted) gets one.

use std::time::Instant;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use uuid::Uuid;

use chatrelay_core::llm::client::CompletionClient;
use chatrelay_core::platform::ChatPlatform;
use chatrelay_core::relay::service::RelayOutcome;
use chatrelay_core::storage::conversation_store::ConversationStore;
use chatrelay_types::telegram::Update;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// POST /webhook - Receive one Telegram update.
///
/// A body that is not a valid update is treated like an update without
/// text: nothing is sent and `200` is returned. A reply the Bot API refused
/// is reported as `status: "send_failed"` with `200`.
pub async fn receive_update<S, C, P>(
    State(state): State<AppState<S, C, P>>,
    body: Bytes,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError>
where
    S: ConversationStore + 'static,
    C: CompletionClient + 'static,
    P: ChatPlatform + 'static,
{
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            tracing::debug!(request_id = %request_id, error = %e, "Unparseable webhook payload, ignoring");
            Update::default()
        }
    };

    let outcome = state.relay.handle_update(&update).await?;

    let data = match &outcome {
        RelayOutcome::Ignored => serde_json::json!({
            "update_id": update.update_id,
            "status": "ignored",
        }),
        RelayOutcome::Replied(reply) => serde_json::json!({
            "update_id": update.update_id,
            "status": "replied",
            "reply": reply.kind.as_str(),
        }),
        RelayOutcome::Undelivered { reply, error } => serde_json::json!({
            "update_id": update.update_id,
            "status": "send_failed",
            "reply": reply.kind.as_str(),
            "error": error,
        }),
    };

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(data, request_id, elapsed)))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chatrelay_core::storage::conversation_store::ConversationStore;
    use chatrelay_types::chat::ChatId;
    use chatrelay_types::turn::Turn;
    use tower::ServiceExt;

    use crate::http::router::build_router;
    use crate::test_support::{failing_platform_state, test_state};

    fn post_webhook(body: impl Into<Body>) -> Request<Body> {
        Request::post("/webhook")
            .header("content-type", "application/json")
            .body(body.into())
            .unwrap()
    }

    fn update_json(chat_id: i64, text: &str) -> String {
        serde_json::json!({
            "update_id": 900,
            "message": {
                "message_id": 1,
                "from": {"id": chat_id, "first_name": "Ada", "username": "ada"},
                "chat": {"id": chat_id, "type": "private"},
                "text": text
            }
        })
        .to_string()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_start_replies_with_welcome() {
        let (state, platform) = test_state(vec![]);
        let response = build_router(state.clone())
            .oneshot(post_webhook(update_json(5, "/START")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["data"]["status"], "replied");
        assert_eq!(body["data"]["reply"], "welcome");
        assert_eq!(
            platform.sent(),
            vec![(ChatId(5), "Welcome, You can start chatting with Haj Jipit.".to_string())]
        );
        assert_eq!(state.relay.store().chat_count(), 0);
    }

    #[tokio::test]
    async fn test_message_is_relayed_and_stored() {
        let (state, platform) = test_state(vec![Turn::assistant("hello")]);
        let response = build_router(state.clone())
            .oneshot(post_webhook(update_json(77, "hi")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["data"]["reply"], "completion");
        assert_eq!(platform.sent(), vec![(ChatId(77), "hello".to_string())]);
        assert_eq!(
            state.relay.store().fetch(ChatId(77)).await.unwrap(),
            vec![Turn::user("hi"), Turn::assistant("hello")]
        );
    }

    #[tokio::test]
    async fn test_clear_empties_history() {
        let (state, platform) = test_state(vec![Turn::assistant("hello")]);
        let router = build_router(state.clone());

        router
            .clone()
            .oneshot(post_webhook(update_json(8, "remember me")))
            .await
            .unwrap();
        assert_eq!(state.relay.store().fetch(ChatId(8)).await.unwrap().len(), 2);

        let response = router.oneshot(post_webhook(update_json(8, "/clear"))).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(state.relay.store().fetch(ChatId(8)).await.unwrap().is_empty());
        assert_eq!(platform.sent().last().unwrap().1, "Conversation cleared.");
    }

    #[tokio::test]
    async fn test_empty_text_sends_nothing() {
        let (state, platform) = test_state(vec![Turn::assistant("unused")]);
        let response = build_router(state)
            .oneshot(post_webhook(update_json(9, "")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["data"]["status"], "ignored");
        assert!(platform.sent().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_payload_is_ignored() {
        let (state, platform) = test_state(vec![Turn::assistant("unused")]);
        let response = build_router(state)
            .oneshot(post_webhook("{not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["data"]["status"], "ignored");
        assert!(platform.sent().is_empty());
    }

    #[tokio::test]
    async fn test_zero_candidates_reply_with_fallback() {
        let (state, platform) = test_state(vec![]);
        let response = build_router(state.clone())
            .oneshot(post_webhook(update_json(3, "a very long prompt")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["data"]["reply"], "fallback");
        assert!(platform.sent()[0].1.contains("/CLEAR"));
        assert!(state.relay.store().fetch(ChatId(3)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_send_failure_answers_ok() {
        let state = failing_platform_state(vec![]);
        let response = build_router(state)
            .oneshot(post_webhook(update_json(4, "/start")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["data"]["status"], "send_failed");
        assert_eq!(body["data"]["reply"], "welcome");
    }

    /// Deliver the way Telegram does: once, then again only after a non-2xx answer.
    async fn deliver_with_redelivery(router: axum::Router, body: &str) -> StatusCode {
        let first = router.clone().oneshot(post_webhook(body.to_string())).await.unwrap();
        if first.status().is_success() {
            return first.status();
        }
        router.oneshot(post_webhook(body.to_string())).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_send_failure_does_not_duplicate_history() {
        let state = failing_platform_state(vec![Turn::assistant("hello")]);
        let router = build_router(state.clone());

        let status = deliver_with_redelivery(router, &update_json(12, "hi")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            state.relay.store().fetch(ChatId(12)).await.unwrap(),
            vec![Turn::user("hi"), Turn::assistant("hello")]
        );
    }
}

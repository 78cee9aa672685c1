//! Axum router configuration with middleware.
//!
//! Routes: `POST /webhook` for Telegram updates, `GET /health`.
//! Middleware: request tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use chatrelay_core::llm::client::CompletionClient;
use chatrelay_core::platform::{ChatPlatform, WEBHOOK_PATH};
use chatrelay_core::storage::conversation_store::ConversationStore;

use crate::http::handlers;
use crate::state::AppState;

/// Build the router with all routes and middleware.
pub fn build_router<S, C, P>(state: AppState<S, C, P>) -> Router
where
    S: ConversationStore + 'static,
    C: CompletionClient + 'static,
    P: ChatPlatform + 'static,
{
    Router::new()
        .route(WEBHOOK_PATH, post(handlers::webhook::receive_update::<S, C, P>))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Liveness check.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use tower::ServiceExt;

    use crate::test_support::test_state;

    #[tokio::test]
    async fn test_health_check() {
        let (state, _platform) = test_state(vec![]);
        let response = build_router(state)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["status"], "ok");
    }

    #[tokio::test]
    async fn test_webhook_rejects_get() {
        let (state, _platform) = test_state(vec![]);
        let response = build_router(state)
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri("/webhook")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let (state, _platform) = test_state(vec![]);
        let response = build_router(state)
            .oneshot(Request::get("/api/v1/bots").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

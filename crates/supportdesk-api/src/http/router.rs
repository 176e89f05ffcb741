//! Axum router configuration with middleware.
//!
//! Chat routes live under `/api/chat/`; `/health` sits at the root.
//! Middleware: permissive CORS and request tracing.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let chat_routes = Router::new()
        .route("/history", get(handlers::chat::missing_session_id))
        .route("/history/", get(handlers::chat::missing_session_id))
        .route("/history/{session_id}", get(handlers::chat::get_history))
        .route("/message", post(handlers::chat::send_message));

    Router::new()
        .nest("/api/chat", chat_routes)
        .route("/health", get(handlers::health::health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use supportdesk_core::chat::service::ConversationService;
    use supportdesk_core::llm::box_provider::BoxLlmProvider;
    use supportdesk_core::llm::provider::LlmProvider;
    use supportdesk_core::reply::{ReplyGenerator, UNAVAILABLE_REPLY};
    use supportdesk_infra::sqlite::chat::SqliteChatRepository;
    use supportdesk_infra::sqlite::pool::{database_url_for, DatabasePool};
    use supportdesk_types::config::ChatConfig;
    use supportdesk_types::llm::{
        CompletionRequest, CompletionResponse, LlmError, StopReason, Usage,
    };

    use super::*;

    /// Answers every request with a fixed reply or a fixed failure.
    struct ScriptedProvider {
        reply: Result<String, String>,
    }

    impl LlmProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        fn model(&self) -> &str {
            "scripted-model"
        }

        async fn complete(
            &self,
            _request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            match &self.reply {
                Ok(text) => Ok(CompletionResponse {
                    content: text.clone(),
                    model: "scripted-model".to_string(),
                    stop_reason: StopReason::EndTurn,
                    usage: Usage::default(),
                }),
                Err(message) => Err(LlmError::Provider {
                    message: message.clone(),
                }),
            }
        }
    }

    struct TestApp {
        router: Router,
        pool: DatabasePool,
        _dir: TempDir,
    }

    async fn test_app(reply: Result<&str, &str>) -> TestApp {
        let dir = tempfile::tempdir().unwrap();
        let pool = DatabasePool::new(&database_url_for(dir.path())).await.unwrap();

        let provider = ScriptedProvider {
            reply: reply.map(str::to_string).map_err(str::to_string),
        };
        let config = ChatConfig::default();
        let generator = ReplyGenerator::new(BoxLlmProvider::new(provider), config.max_output_tokens);
        let service =
            ConversationService::new(SqliteChatRepository::new(pool.clone()), generator, config);

        TestApp {
            router: build_router(AppState::new(service)),
            pool,
            _dir: dir,
        }
    }

    async fn call(router: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    async fn call_json(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let (status, bytes) = call(router, request).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_message(body: impl Into<String>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/chat/message")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.into()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app(Ok("hi")).await;
        let (status, body) = call(&app.router, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            String::from_utf8(body).unwrap(),
            "AI Support Agent API is running"
        );
    }

    #[tokio::test]
    async fn test_new_conversation_then_history() {
        let app = test_app(Ok("Unused items can be returned within 30 days.")).await;

        let (status, body) = call_json(
            &app.router,
            post_message(json!({"message": "What is your return policy?"}).to_string()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], true);
        assert_eq!(
            body["agentResponse"]["reply"],
            "Unused items can be returned within 30 days."
        );
        let session_id = body["agentResponse"]["sessionId"].as_str().unwrap().to_string();
        assert!(!session_id.is_empty());

        let (status, body) =
            call_json(&app.router, get(&format!("/api/chat/history/{session_id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let history = body["chatHistory"].as_array().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0]["sender"], "user");
        assert_eq!(history[0]["text"], "What is your return policy?");
        assert_eq!(history[0]["sessionId"], session_id.as_str());
        assert_eq!(history[1]["sender"], "agent");
        assert!(history[1]["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_existing_session_grows_by_two() {
        let app = test_app(Ok("Sure.")).await;

        let (_, first) =
            call_json(&app.router, post_message(r#"{"message":"hi"}"#)).await;
        let session_id = first["agentResponse"]["sessionId"].as_str().unwrap().to_string();

        let (status, second) = call_json(
            &app.router,
            post_message(json!({"message": "and shipping?", "sessionId": session_id}).to_string()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(second["agentResponse"]["sessionId"], session_id.as_str());

        let (_, body) =
            call_json(&app.router, get(&format!("/api/chat/history/{session_id}"))).await;
        let texts: Vec<&str> = body["chatHistory"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["text"].as_str().unwrap())
            .collect();
        assert_eq!(texts, vec!["hi", "Sure.", "and shipping?", "Sure."]);
    }

    #[tokio::test]
    async fn test_unknown_session_id_is_used_verbatim() {
        let app = test_app(Ok("Hello!")).await;

        let (status, body) = call_json(
            &app.router,
            post_message(r#"{"message":"hello","sessionId":"widget-1234"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["agentResponse"]["sessionId"], "widget-1234");

        let (_, body) = call_json(&app.router, get("/api/chat/history/widget-1234")).await;
        assert_eq!(body["chatHistory"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_and_missing_messages_are_rejected() {
        let app = test_app(Ok("unused")).await;
        let expected = json!({"success": false, "error": "Message cannot be empty"});

        for body in [
            r#"{"message":""}"#,
            r#"{"message":"   \n\t "}"#,
            r#"{}"#,
            r#"{"message":null}"#,
            r#"{"message":42}"#,
            r#"{"message":["hi"]}"#,
        ] {
            let (status, json) = call_json(&app.router, post_message(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
            assert_eq!(json, expected, "body: {body}");
        }
    }

    #[tokio::test]
    async fn test_rejected_message_writes_nothing() {
        let app = test_app(Ok("unused")).await;

        let (status, _) = call_json(
            &app.router,
            post_message(r#"{"message":"  ","sessionId":"quiet"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) = call_json(&app.router, get("/api/chat/history/quiet")).await;
        assert_eq!(body["chatHistory"], json!([]));
    }

    #[tokio::test]
    async fn test_message_length_limit() {
        let app = test_app(Ok("ok")).await;

        let too_long = "a".repeat(5001);
        let (status, body) =
            call_json(&app.router, post_message(json!({"message": too_long}).to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Message too long (maximum 5000 characters)");

        let at_limit = "a".repeat(5000);
        let (status, _) =
            call_json(&app.router, post_message(json!({"message": at_limit}).to_string())).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected() {
        let app = test_app(Ok("ok")).await;
        let (status, body) = call_json(&app.router, post_message("{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"success": false, "error": "Invalid JSON body"}));
    }

    #[tokio::test]
    async fn test_provider_failure_returns_apology() {
        let app = test_app(Err("quota exceeded")).await;

        let (status, body) =
            call_json(&app.router, post_message(r#"{"message":"hello"}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["agentResponse"]["reply"], UNAVAILABLE_REPLY);

        let session_id = body["agentResponse"]["sessionId"].as_str().unwrap();
        let (_, history) =
            call_json(&app.router, get(&format!("/api/chat/history/{session_id}"))).await;
        assert_eq!(history["chatHistory"][1]["sender"], "agent");
        assert_eq!(history["chatHistory"][1]["text"], UNAVAILABLE_REPLY);
    }

    #[tokio::test]
    async fn test_unknown_session_history_is_empty() {
        let app = test_app(Ok("ok")).await;
        let (status, body) = call_json(&app.router, get("/api/chat/history/never-seen")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true, "chatHistory": []}));
    }

    #[tokio::test]
    async fn test_history_without_session_id() {
        let app = test_app(Ok("ok")).await;
        let expected = json!({"success": false, "error": "Session ID is required"});

        for uri in ["/api/chat/history", "/api/chat/history/", "/api/chat/history/%20%20"] {
            let (status, body) = call_json(&app.router, get(uri)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "uri: {uri}");
            assert_eq!(body, expected, "uri: {uri}");
        }
    }

    #[tokio::test]
    async fn test_store_failure_is_internal_error() {
        let app = test_app(Ok("ok")).await;
        app.pool.reader.close().await;
        app.pool.writer.close().await;

        let expected = json!({"success": false, "error": "Internal server error"});

        let (status, body) =
            call_json(&app.router, post_message(r#"{"message":"hello"}"#)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, expected);

        let (status, body) = call_json(&app.router, get("/api/chat/history/abc")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, expected);
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let app = test_app(Ok("ok")).await;
        let request = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "http://widget.example.com")
            .body(Body::empty())
            .unwrap();

        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
    }
}

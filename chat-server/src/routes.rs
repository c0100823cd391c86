//! HTTP routes.
//!
//! `POST /chat` takes `{"prompt": "..."}` and answers `{"reply": "..."}`.
//! A missing or malformed body is answered like an empty prompt. Every
//! outcome is a `200 OK`; the `status` field tells them apart.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use menuchat_retrieval::{RetrievalEngine, RetrievalResult};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::debug;

/// Hint returned for `GET /chat`.
pub const CHAT_USAGE: &str = "Send a POST request with JSON data to chat.";

#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

impl From<RetrievalResult> for ChatResponse {
    fn from(result: RetrievalResult) -> Self {
        Self {
            reply: result.reply().to_string(),
            status: Some(result.status().to_string()),
            // JSON has no infinity; degenerate matches carry no score.
            score: result.score().filter(|s| s.is_finite()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub ready: bool,
    pub entries: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Build the application router around a shared engine.
///
/// Cross-origin requests are allowed from any origin so a browser front end
/// served elsewhere can call `/chat`.
pub fn router(engine: Arc<RetrievalEngine>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(health))
        .route("/chat", get(chat_usage).post(chat))
        .layer(cors)
        .with_state(engine)
}

pub async fn health(State(engine): State<Arc<RetrievalEngine>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "running".to_string(),
        ready: engine.is_ready(),
        entries: engine.index().len(),
        reason: engine.unavailable_reason().map(ToString::to_string),
    })
}

pub async fn chat_usage() -> Json<ChatResponse> {
    Json(ChatResponse {
        reply: CHAT_USAGE.to_string(),
        status: None,
        score: None,
    })
}

pub async fn chat(State(engine): State<Arc<RetrievalEngine>>, body: Bytes) -> Json<ChatResponse> {
    let request: ChatRequest = serde_json::from_slice(&body).unwrap_or_else(|err| {
        debug!("Unreadable chat body, treating as empty prompt: {err}");
        ChatRequest::default()
    });

    Json(engine.retrieve(&request.prompt).await.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use menuchat_embeddings::{
        EmbeddingError, EmbeddingProvider, EmbeddingRequest, EmbeddingResponse,
    };
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    /// Maps "espresso" and "latte" to orthogonal axes; anything else fails.
    struct MenuProvider;

    #[async_trait]
    impl EmbeddingProvider for MenuProvider {
        fn name(&self) -> &str {
            "menu"
        }

        fn default_model(&self) -> &str {
            "menu"
        }

        fn default_dimension(&self) -> usize {
            2
        }

        async fn embed(
            &self,
            request: EmbeddingRequest,
        ) -> menuchat_embeddings::Result<EmbeddingResponse> {
            let text = request.text.to_lowercase();
            let vector = if text.contains("espresso") {
                vec![1.0, 0.1]
            } else if text.contains("latte") {
                vec![0.1, 1.0]
            } else {
                return Err(EmbeddingError::ApiRequest("upstream said no".to_string()));
            };
            Ok(EmbeddingResponse::new(vector, "menu"))
        }

        fn is_available(&self) -> bool {
            true
        }
    }

    async fn ready_engine() -> Arc<RetrievalEngine> {
        Arc::new(
            RetrievalEngine::builder()
                .with_corpus(["espresso: a strong coffee", "latte: coffee with milk"])
                .with_provider(Arc::new(MenuProvider))
                .build()
                .await,
        )
    }

    async fn unavailable_engine() -> Arc<RetrievalEngine> {
        Arc::new(RetrievalEngine::builder().build().await)
    }

    #[tokio::test]
    async fn test_chat_match() {
        let Json(response) = chat(
            State(ready_engine().await),
            Bytes::from_static(br#"{"prompt": "what is espresso"}"#),
        )
        .await;

        assert_eq!(response.reply, "espresso: a strong coffee");
        assert_eq!(response.status.as_deref(), Some("match"));
        assert!(response.score.is_some());
    }

    #[tokio::test]
    async fn test_chat_empty_prompt() {
        let Json(response) = chat(
            State(ready_engine().await),
            Bytes::from_static(br#"{"prompt": "   "}"#),
        )
        .await;

        assert_eq!(response.reply, "Please type something before asking.");
    }

    #[tokio::test]
    async fn test_chat_malformed_body_is_empty_prompt() {
        let engine = ready_engine().await;

        let Json(response) = chat(State(engine.clone()), Bytes::from_static(b"not json")).await;
        assert_eq!(response.status.as_deref(), Some("empty_query"));

        let Json(response) = chat(State(engine), Bytes::new()).await;
        assert_eq!(response.status.as_deref(), Some("empty_query"));
    }

    #[tokio::test]
    async fn test_chat_provider_error_hides_detail() {
        let Json(response) = chat(
            State(ready_engine().await),
            Bytes::from_static(br#"{"prompt": "cappuccino"}"#),
        )
        .await;

        assert_eq!(response.status.as_deref(), Some("provider_error"));
        assert!(!response.reply.contains("upstream said no"));
    }

    #[tokio::test]
    async fn test_chat_unavailable() {
        let Json(response) = chat(
            State(unavailable_engine().await),
            Bytes::from_static(br#"{"prompt": "latte"}"#),
        )
        .await;

        assert_eq!(response.status.as_deref(), Some("service_unavailable"));
        assert_eq!(response.reply, "Backend not ready. Check server logs.");

        let Json(response) = chat(
            State(unavailable_engine().await),
            Bytes::from_static(br#"{"prompt": ""}"#),
        )
        .await;
        assert_eq!(response.status.as_deref(), Some("service_unavailable"));
    }

    #[tokio::test]
    async fn test_router_answers_unavailable_with_ok() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"prompt": "latte"}"#))
            .unwrap();

        let response = router(unavailable_engine().await)
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cors_preflight_allows_any_origin() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/chat")
            .header(header::ORIGIN, "http://localhost:3000")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();

        let response = router(ready_engine().await)
            .oneshot(request)
            .await
            .unwrap();

        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&header::HeaderValue::from_static("*"))
        );
    }

    #[tokio::test]
    async fn test_cors_header_on_chat_response() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/chat")
            .header(header::ORIGIN, "http://localhost:3000")
            .body(Body::from(r#"{"prompt": "espresso"}"#))
            .unwrap();

        let response = router(ready_engine().await)
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response
                .headers()
                .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        );
    }

    #[tokio::test]
    async fn test_health() {
        let Json(body) = health(State(ready_engine().await)).await;
        assert_eq!(
            body,
            HealthResponse {
                status: "running".to_string(),
                ready: true,
                entries: 2,
                reason: None,
            }
        );

        let Json(body) = health(State(unavailable_engine().await)).await;
        assert!(!body.ready);
        assert_eq!(body.reason.as_deref(), Some("corpus is empty"));
    }

    #[tokio::test]
    async fn test_chat_usage() {
        let Json(response) = chat_usage().await;
        assert_eq!(response.reply, CHAT_USAGE);
    }

    #[test]
    fn test_degenerate_score_is_omitted() {
        let response = ChatResponse::from(RetrievalResult::Match {
            text: "espresso".to_string(),
            score: f32::NEG_INFINITY,
        });
        assert_eq!(response.score, None);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({"reply": "espresso", "status": "match"})
        );
    }
}

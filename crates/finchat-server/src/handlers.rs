//! HTTP/WebSocket Handlers

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
    Json,
};
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};

use finchat_core::Intent;

use crate::state::AppState;

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub catalog_symbols: usize,
    pub catalog_aliases: usize,
    pub live_sessions: usize,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Chat reply. `symbols` and `show_chart` are always present - downstream
/// tooling asserts on these exact fields even when empty or false.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub session_id: String,
    pub intent: Intent,
    pub symbols: Vec<String>,
    pub show_chart: bool,
    pub refused: bool,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        catalog_symbols: state.engine.catalog().symbol_count(),
        catalog_aliases: state.engine.catalog().alias_count(),
        live_sessions: state.engine.store().len(),
    })
}

/// Main chat endpoint. Never fails for user input; malformed messages come
/// back as ordinary refusal or capability replies.
pub async fn chat_handler(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let session_id = payload
        .session_id
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let understanding = state.engine.understand(&payload.message, &session_id);
    let reply = state.responder.reply(&understanding).await;

    Json(ChatResponse {
        reply,
        session_id,
        intent: understanding.intent,
        symbols: understanding
            .symbols
            .iter()
            .map(ToString::to_string)
            .collect(),
        show_chart: understanding.show_chart,
        refused: understanding.is_refusal,
    })
}

/// WebSocket chat: same JSON frames as the REST endpoint, one reply per
/// message
pub async fn chat_stream_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> Response {
    ws.on_upgrade(move |socket| handle_stream(socket, state))
}

async fn handle_stream(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();

    // One generated session id covers the whole socket when frames omit one
    let socket_session = uuid::Uuid::new_v4().to_string();

    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) => break,
            Err(e) => {
                tracing::error!("WebSocket error: {}", e);
                break;
            }
            _ => continue,
        };

        let request: ChatRequest = match serde_json::from_str(&msg) {
            Ok(r) => r,
            Err(e) => {
                let error = serde_json::json!({"type": "error", "error": e.to_string()});
                let _ = sender.send(Message::Text(error.to_string().into())).await;
                continue;
            }
        };

        let session_id = request.session_id.unwrap_or_else(|| socket_session.clone());
        let understanding = state.engine.understand(&request.message, &session_id);
        let reply = state.responder.reply(&understanding).await;

        let frame = serde_json::json!({
            "type": "reply",
            "reply": reply,
            "session_id": session_id,
            "intent": understanding.intent,
            "symbols": understanding.symbols,
            "show_chart": understanding.show_chart,
            "refused": understanding.is_refusal,
        });
        if sender
            .send(Message::Text(frame.to_string().into()))
            .await
            .is_err()
        {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::MockMarketData;
    use crate::respond::ResponseGenerator;
    use query_engine::QueryEngine;
    use std::sync::Arc;

    fn test_state() -> AppState {
        AppState {
            engine: Arc::new(QueryEngine::builtin().unwrap()),
            responder: Arc::new(ResponseGenerator::new(Arc::new(MockMarketData))),
        }
    }

    #[tokio::test]
    async fn test_chat_wire_contract() {
        let state = test_state();
        let Json(response) = chat_handler(
            State(state),
            Json(ChatRequest {
                message: "how do I bake bread?".into(),
                session_id: Some("wire".into()),
            }),
        )
        .await;

        // symbols and show_chart must be present even for refusals
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["symbols"], serde_json::json!([]));
        assert_eq!(json["show_chart"], serde_json::json!(false));
        assert_eq!(json["refused"], serde_json::json!(true));
    }

    #[tokio::test]
    async fn test_chat_generates_session_id() {
        let state = test_state();
        let Json(response) = chat_handler(
            State(state),
            Json(ChatRequest {
                message: "bitcoin?".into(),
                session_id: None,
            }),
        )
        .await;

        assert!(!response.session_id.is_empty());
        assert_eq!(response.symbols, vec!["BTC".to_string()]);
        assert!(response.show_chart);
    }

    #[tokio::test]
    async fn test_context_carries_across_requests() {
        let state = test_state();

        let _ = chat_handler(
            State(state.clone()),
            Json(ChatRequest {
                message: "how is AMD doing?".into(),
                session_id: Some("ctx".into()),
            }),
        )
        .await;

        let Json(follow_up) = chat_handler(
            State(state),
            Json(ChatRequest {
                message: "what's the trend?".into(),
                session_id: Some("ctx".into()),
            }),
        )
        .await;

        assert_eq!(follow_up.symbols, vec!["AMD".to_string()]);
        assert!(follow_up.show_chart);
    }
}

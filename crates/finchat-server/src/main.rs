//! finchat HTTP Server
//!
//! Axum front-end for the query understanding engine. The transport layer is
//! deliberately thin: it maps wire requests to `understand()` calls, renders
//! the template reply, and serializes the result. All decision logic lives
//! in `query-engine`.

mod handlers;
mod market;
mod respond;
mod state;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use query_engine::QueryEngine;

use crate::handlers::{chat_handler, chat_stream_handler, health_check};
use crate::market::MockMarketData;
use crate::respond::ResponseGenerator;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    // Catalog integrity problems are fatal here, never at request time
    let engine = Arc::new(QueryEngine::builtin().context("symbol catalog failed validation")?);
    tracing::info!(
        symbols = engine.catalog().symbol_count(),
        aliases = engine.catalog().alias_count(),
        "✓ Symbol catalog loaded"
    );

    let market = Arc::new(MockMarketData);
    let responder = Arc::new(ResponseGenerator::new(market));

    let state = AppState { engine, responder };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/api/chat", post(chat_handler))
        .route("/api/chat/stream", get(chat_stream_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("🚀 finchat server running on http://{}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health          - Health check");
    tracing::info!("  POST /api/chat        - Send message");
    tracing::info!("  GET  /api/chat/stream - WebSocket chat");

    axum::serve(listener, app).await?;

    Ok(())
}

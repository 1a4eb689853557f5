//! Luxe Essence storefront backend
//!
//! Serves the fragrance catalog, a per-process shopping cart and a chat
//! session with an LLM-backed perfume sommelier.

mod api;
mod cart;
mod catalog;
mod chat;
mod llm;
mod responder;
mod runtime;
mod system_prompt;

use api::{create_router, AppState};
use llm::LlmConfig;
use responder::SommelierResponder;
use runtime::{spawn_chat, Storefront};
use std::net::SocketAddr;
use tokio::sync::broadcast;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "luxe_essence=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let port: u16 = std::env::var("STOREFRONT_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    // Sommelier
    let llm_config = LlmConfig::from_env();
    let llm = llm_config.build_service();
    match &llm {
        Some(service) => tracing::info!(model = %service.model_id(), "Sommelier connected"),
        None => tracing::warn!("No LLM credentials configured. Set GEMINI_API_KEY or LLM_GATEWAY."),
    }
    let responder = SommelierResponder::new(llm);

    // Application state
    let (broadcast_tx, _) = broadcast::channel(256);
    let storefront = Storefront::new(catalog::catalog(), broadcast_tx.clone());
    let chat = spawn_chat(responder, system_prompt::GREETING, broadcast_tx.clone());
    let state = AppState::new(storefront, chat, broadcast_tx);

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new().gzip(true).br(true);

    let app = create_router(state)
        .layer(cors)
        .layer(compression)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Luxe Essence server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

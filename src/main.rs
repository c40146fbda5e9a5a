//! Ollama chat front-end
//!
//! Relays chat messages from logged-in users to a locally hosted inference
//! server, keeping per-session history and a user-selected model.

mod api;
mod auth;
mod config;
mod llm;
mod model_selection;
mod runtime;
mod session;
mod turn;

use api::{create_router, AppState};
use auth::StaticCredentials;
use config::Config;
use llm::{LoggingClient, OllamaClient};
use runtime::SessionManager;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
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
                .unwrap_or_else(|_| "ollama_chat=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = Config::from_env()?;

    let ollama = OllamaClient::new(config.ollama_url.clone(), config.request_timeout)?;
    tracing::info!(
        chat_url = %ollama.chat_url(),
        models_url = %ollama.models_url(),
        default_model = %config.default_model,
        timeout_secs = config.request_timeout.as_secs(),
        "Inference client configured"
    );
    let client = Arc::new(LoggingClient::new(Arc::new(ollama)));

    // Create application state
    let state = AppState::new(
        SessionManager::new(config.system_prompt.clone()),
        client,
        Arc::new(StaticCredentials::new(
            config.admin_username.clone(),
            config.admin_password.clone(),
        )),
        &config.default_model,
    );

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Chat server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

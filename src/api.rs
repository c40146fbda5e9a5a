//! HTTP API for the chat front-end

mod handlers;
mod types;

pub use handlers::create_router;

use crate::auth::Authenticator;
use crate::llm::InferenceClient;
use crate::runtime::SessionManager;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionManager>,
    pub client: Arc<dyn InferenceClient>,
    pub auth: Arc<dyn Authenticator>,
    /// Model used when a session has not selected one
    pub default_model: Arc<str>,
}

impl AppState {
    pub fn new(
        sessions: SessionManager,
        client: Arc<dyn InferenceClient>,
        auth: Arc<dyn Authenticator>,
        default_model: &str,
    ) -> Self {
        Self {
            sessions: Arc::new(sessions),
            client,
            auth,
            default_model: Arc::from(default_model),
        }
    }
}

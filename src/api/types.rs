//! API request and response types

use crate::auth::Identity;
use crate::llm::Message;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Login that starts a session
#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    pub username: String,
    pub password: String,
}

/// Request to change the session's model
#[derive(Debug, Deserialize)]
pub struct SetModelRequest {
    pub model: String,
}

/// Request to send a chat message
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub content: String,
}

/// A new session with its model selector
#[derive(Debug, Serialize)]
pub struct SessionStartedResponse {
    pub session_id: String,
    pub user: Identity,
    pub models: Vec<String>,
    pub selected_index: usize,
    pub selected_model: String,
}

/// Response with the session's state
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub selected_model: Option<String>,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
}

/// Response for a model change
#[derive(Debug, Serialize)]
pub struct ModelResponse {
    pub selected_model: String,
}

/// Assistant reply for one turn
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub model: String,
}

/// Response for lifecycle actions
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'static str>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            category: None,
        }
    }

    pub fn with_category(mut self, category: &'static str) -> Self {
        self.category = Some(category);
        self
    }
}

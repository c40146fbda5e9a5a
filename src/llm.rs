//! Inference server access
//!
//! Talks to a locally hosted Ollama instance through its `OpenAI`-compatible
//! chat-completion and model-listing endpoints.

mod error;
mod ollama;
mod types;

#[cfg(test)]
mod proptests;

pub use error::{LlmError, LlmErrorKind};
pub use ollama::OllamaClient;
pub use types::Message;
#[cfg(test)]
pub use types::MessageRole;

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for inference backends
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// List the model identifiers the server offers
    async fn list_models(&self) -> Result<Vec<String>, LlmError>;

    /// Run one chat completion over `messages` and return the reply text
    async fn complete(&self, model: &str, messages: &[Message]) -> Result<String, LlmError>;
}

/// Logging wrapper for inference clients
pub struct LoggingClient {
    inner: Arc<dyn InferenceClient>,
}

impl LoggingClient {
    pub fn new(inner: Arc<dyn InferenceClient>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl InferenceClient for LoggingClient {
    async fn list_models(&self) -> Result<Vec<String>, LlmError> {
        let start = std::time::Instant::now();
        let result = self.inner.list_models().await;
        let duration = start.elapsed();

        match &result {
            Ok(models) => {
                tracing::debug!(
                    duration_ms = %duration.as_millis(),
                    count = models.len(),
                    "Model listing completed"
                );
            }
            Err(e) => {
                tracing::warn!(
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    category = e.kind.category(),
                    "Model listing failed"
                );
            }
        }

        result
    }

    async fn complete(&self, model: &str, messages: &[Message]) -> Result<String, LlmError> {
        let start = std::time::Instant::now();
        let result = self.inner.complete(model, messages).await;
        let duration = start.elapsed();

        match &result {
            Ok(reply) => {
                tracing::info!(
                    model = %model,
                    duration_ms = %duration.as_millis(),
                    messages = messages.len(),
                    reply_chars = reply.chars().count(),
                    "Completion request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %model,
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    category = e.kind.category(),
                    "Completion request failed"
                );
            }
        }

        result
    }
}

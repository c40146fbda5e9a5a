//! Mock implementations for testing
//!
//! These mocks let the turn and API layers run without an inference server.

use crate::llm::{InferenceClient, LlmError, Message};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

/// A completion request as the mock received it
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub model: String,
    pub messages: Vec<Message>,
}

/// Mock inference client that returns queued results
pub struct MockInferenceClient {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    listings: Mutex<VecDeque<Result<Vec<String>, LlmError>>>,
    /// Record of all completion requests made
    requests: Mutex<Vec<RecordedRequest>>,
    /// When set, each completion waits for one permit after being recorded
    gate: Option<Arc<Notify>>,
}

impl MockInferenceClient {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            listings: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    /// Hold every completion until `gate` hands out a permit
    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Queue the result of the next `list_models` call
    pub fn with_models(self, listing: Result<Vec<String>, LlmError>) -> Self {
        self.listings.lock().unwrap().push_back(listing);
        self
    }

    /// Queue a successful completion
    pub fn queue_reply(&self, reply: impl Into<String>) {
        self.replies.lock().unwrap().push_back(Ok(reply.into()));
    }

    /// Queue a failed completion
    pub fn queue_error(&self, error: LlmError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    pub fn recorded_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Wait until at least `count` completions have been recorded
    pub async fn wait_for_requests(&self, count: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while self.requests.lock().unwrap().len() < count {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("timed out waiting for completion requests");
    }
}

#[async_trait]
impl InferenceClient for MockInferenceClient {
    async fn list_models(&self) -> Result<Vec<String>, LlmError> {
        self.listings
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::unavailable("No mock model listing queued")))
    }

    async fn complete(&self, model: &str, messages: &[Message]) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            model: model.to_string(),
            messages: messages.to_vec(),
        });
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::unavailable("No mock reply queued")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_replays_queue_in_order() {
        let mock = MockInferenceClient::new();
        mock.queue_reply("first");
        mock.queue_error(LlmError::http(503, "busy"));

        assert_eq!(mock.complete("m", &[]).await.unwrap(), "first");
        assert_eq!(mock.complete("m", &[]).await.unwrap_err().status(), Some(503));
        // Exhausted queue behaves like an unreachable server
        assert!(mock.complete("m", &[]).await.is_err());
        assert_eq!(mock.recorded_requests().len(), 3);
    }

    #[tokio::test]
    async fn test_gated_completion_waits_for_permit() {
        let gate = Arc::new(Notify::new());
        let mock = Arc::new(MockInferenceClient::new().with_gate(gate.clone()));
        mock.queue_reply("late");

        let pending = tokio::spawn({
            let mock = mock.clone();
            async move { mock.complete("m", &[]).await }
        });
        mock.wait_for_requests(1).await;
        assert!(!pending.is_finished());

        gate.notify_one();
        assert_eq!(pending.await.unwrap().unwrap(), "late");
    }
}

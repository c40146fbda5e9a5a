//! Ollama client over its `OpenAI`-compatible `/v1` API

use super::types::{completion_content, parse_model_list, ChatCompletionRequest, Message};
use super::{InferenceClient, LlmError};
use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde_json::Value;
use std::time::Duration;

/// Path of the models listing, relative to the server root
const MODELS_PATH: &str = "/v1/models";

/// Undecodable bodies are cut to this many characters in error messages
const MAX_QUOTED_BODY_CHARS: usize = 512;

/// Inference client bound to one chat-completion endpoint
pub struct OllamaClient {
    client: Client,
    chat_url: Url,
    models_url: Url,
}

impl OllamaClient {
    pub fn new(chat_url: Url, timeout: Duration) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::unavailable(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            models_url: models_url(&chat_url),
            chat_url,
        })
    }

    pub fn chat_url(&self) -> &Url {
        &self.chat_url
    }

    pub fn models_url(&self) -> &Url {
        &self.models_url
    }

    /// Read the body of a response, rejecting non-success statuses
    async fn read_body(response: Response) -> Result<String, LlmError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::unavailable(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(LlmError::http(status.as_u16(), body));
        }
        Ok(body)
    }
}

/// Same scheme, host and port as `chat_url`, path replaced by `/v1/models`
pub fn models_url(chat_url: &Url) -> Url {
    let mut url = chat_url.clone();
    url.set_path(MODELS_PATH);
    url.set_query(None);
    url.set_fragment(None);
    url
}

fn send_error(e: &reqwest::Error) -> LlmError {
    if e.is_timeout() {
        LlmError::unavailable(format!("Request timeout: {e}"))
    } else if e.is_connect() {
        LlmError::unavailable(format!("Connection failed: {e}"))
    } else {
        LlmError::unavailable(format!("Request failed: {e}"))
    }
}

/// `body` cut to `MAX_QUOTED_BODY_CHARS`, marked when something was dropped
fn quote_body(body: &str) -> String {
    let mut chars = body.chars();
    let quoted: String = chars.by_ref().take(MAX_QUOTED_BODY_CHARS).collect();
    if chars.next().is_some() {
        format!("{quoted}... ({} bytes total)", body.len())
    } else {
        quoted
    }
}

fn parse_json(body: &str) -> Result<Value, LlmError> {
    serde_json::from_str(body).map_err(|e| {
        let quoted = quote_body(body);
        LlmError::malformed(format!("Failed to parse response: {e} - body: {quoted}"))
    })
}

#[async_trait]
impl InferenceClient for OllamaClient {
    async fn list_models(&self) -> Result<Vec<String>, LlmError> {
        let response = self
            .client
            .get(self.models_url.clone())
            .send()
            .await
            .map_err(|e| send_error(&e))?;

        let body = Self::read_body(response).await?;
        let json = parse_json(&body)?;

        parse_model_list(&json).ok_or_else(|| {
            LlmError::malformed(format!("Unexpected models listing: {}", quote_body(&body)))
        })
    }

    async fn complete(&self, model: &str, messages: &[Message]) -> Result<String, LlmError> {
        let request = ChatCompletionRequest { model, messages };

        let response = self
            .client
            .post(self.chat_url.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| send_error(&e))?;

        let body = Self::read_body(response).await?;
        let json = parse_json(&body)?;

        Ok(completion_content(&json))
    }
}

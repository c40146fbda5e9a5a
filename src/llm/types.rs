//! Conversation and wire types for the chat-completion API

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// Message in conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Body of a chat-completion request
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [Message],
}

/// Field names checked for a model identifier, highest precedence first
const MODEL_ID_FIELDS: &[&str] = &["id", "name", "model"];

/// Extract the identifier of one `data[]` entry of a models listing.
///
/// Empty strings count as absent, so an entry with `"id": ""` falls through
/// to `name`.
pub fn model_identifier(entry: &Value) -> Option<&str> {
    MODEL_ID_FIELDS
        .iter()
        .filter_map(|field| entry.get(field).and_then(Value::as_str))
        .find(|id| !id.is_empty())
}

/// Parse a `{ "data": [ {...}, ... ] }` models listing.
///
/// A missing or non-array `data` yields no models; a top level that is not
/// an object is rejected.
pub fn parse_model_list(body: &Value) -> Option<Vec<String>> {
    let object = body.as_object()?;
    let mut models: Vec<String> = Vec::new();

    let entries = object.get("data").and_then(Value::as_array);
    for id in entries.into_iter().flatten().filter_map(model_identifier) {
        if !models.iter().any(|m| m == id) {
            models.push(id.to_string());
        }
    }

    Some(models)
}

/// Pull `choices[0].message.content` out of a completion response, or `""`
pub fn completion_content(body: &Value) -> String {
    body.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

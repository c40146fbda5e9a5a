//! Per-session conversation state
//!
//! A session owns the user's model choice and the ordered history sent to
//! the inference server on every turn. History always begins with the
//! system prompt and only ever grows at the end.

use crate::llm::Message;

/// Ordered conversation history, led by exactly one system message
#[derive(Debug, Clone)]
pub struct History {
    messages: Vec<Message>,
}

impl History {
    fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(system_prompt)],
        }
    }

    pub fn as_slice(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }
}

/// Conversation state for one interactive user
#[derive(Debug, Clone)]
pub struct Session {
    selected_model: Option<String>,
    history: History,
}

impl Session {
    /// Start a conversation with `system_prompt`; no model is selected yet
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            selected_model: None,
            history: History::new(system_prompt),
        }
    }

    pub fn set_model(&mut self, model_id: impl Into<String>) {
        self.selected_model = Some(model_id.into());
    }

    pub fn selected_model(&self) -> Option<&str> {
        self.selected_model.as_deref()
    }

    /// The selected model, or `fallback` when none was chosen
    pub fn model_or(&self, fallback: &str) -> String {
        self.selected_model
            .clone()
            .unwrap_or_else(|| fallback.to_string())
    }

    pub fn append_user(&mut self, content: impl Into<String>) {
        self.history.messages.push(Message::user(content));
    }

    pub fn append_assistant(&mut self, content: impl Into<String>) {
        self.history.messages.push(Message::assistant(content));
    }

    pub fn history(&self) -> &History {
        &self.history
    }
}

//! One conversation turn: user message in, assistant reply out

use crate::llm::{InferenceClient, LlmError, LlmErrorKind};
use crate::session::Session;
use thiserror::Error;

/// A turn that produced no assistant reply
#[derive(Debug, Error)]
#[error("{source}")]
pub struct TurnError {
    /// Model the completion was requested from
    pub model: String,
    #[source]
    pub source: LlmError,
}

impl TurnError {
    pub fn category(&self) -> &'static str {
        self.source.kind.category()
    }

    /// Text shown to the user in place of a reply
    pub fn user_message(&self) -> String {
        match self.source.kind {
            LlmErrorKind::Http { .. } => format!("Inference request failed: {}", self.source),
            LlmErrorKind::Unavailable | LlmErrorKind::Malformed => {
                format!("Unexpected error: {}", self.source)
            }
        }
    }
}

/// Send `incoming_text` with the session history and record the reply.
///
/// The user message is recorded before the upstream call, so a failed turn
/// leaves it in history without an assistant counterpart.
pub async fn handle_turn(
    client: &dyn InferenceClient,
    session: &mut Session,
    incoming_text: &str,
    configured_default_model: &str,
) -> Result<String, TurnError> {
    let model = session.model_or(configured_default_model);
    session.append_user(incoming_text);
    tracing::debug!(model = %model, history_len = session.history().len(), "Sending turn");

    match client.complete(&model, session.history().as_slice()).await {
        Ok(reply) => {
            session.append_assistant(reply.clone());
            Ok(reply)
        }
        Err(source) => Err(TurnError { model, source }),
    }
}

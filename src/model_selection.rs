//! Model selector contents for a new session

use crate::llm::InferenceClient;
use serde::Serialize;

/// Models offered to the user, with the initially selected entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelChoices {
    pub models: Vec<String>,
    pub selected_index: usize,
}

impl ModelChoices {
    /// The initially selected model
    pub fn selected(&self) -> &str {
        &self.models[self.selected_index]
    }
}

/// Fetch the upstream catalog and make sure `configured_default` is offered.
///
/// Listing failures are recovered here: the selector then offers only the
/// configured default.
pub async fn resolve_available_models(
    client: &dyn InferenceClient,
    configured_default: &str,
) -> ModelChoices {
    let mut models = match client.list_models().await {
        Ok(models) => models,
        Err(e) => {
            tracing::warn!(
                error = %e,
                default = %configured_default,
                "Falling back to configured default model"
            );
            Vec::new()
        }
    };

    if !models.iter().any(|m| m == configured_default) {
        models.insert(0, configured_default.to_string());
    }

    let selected_index = models
        .iter()
        .position(|m| m == configured_default)
        .unwrap_or(0);

    ModelChoices {
        models,
        selected_index,
    }
}

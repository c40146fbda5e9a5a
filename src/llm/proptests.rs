//! Property-based tests for the chat-completion wire format
//!
//! - A conversation survives serialization to the request payload
//! - Model listings always contain exactly the first usable identifier per entry
//! - Completion decoding never fails on well-formed JSON

use super::types::{
    completion_content, parse_model_list, ChatCompletionRequest, Message, MessageRole,
};
use proptest::prelude::*;
use serde_json::{json, Value};

// ============================================================================
// Strategies
// ============================================================================

fn arb_role() -> impl Strategy<Value = MessageRole> {
    prop_oneof![
        Just(MessageRole::System),
        Just(MessageRole::User),
        Just(MessageRole::Assistant),
    ]
}

/// Arbitrary text, including empty and non-ASCII content
fn arb_content() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-zA-Z0-9 _.!?,\n\"\\\\]{0,80}",
        "\\PC{0,40}",
    ]
}

fn arb_message() -> impl Strategy<Value = Message> {
    (arb_role(), arb_content()).prop_map(|(role, content)| Message { role, content })
}

/// One `data[]` entry with any combination of identifier fields
fn arb_model_entry() -> impl Strategy<Value = Value> {
    (
        proptest::option::of("[a-z0-9:.]{0,12}"),
        proptest::option::of("[a-z0-9:.]{0,12}"),
        proptest::option::of("[a-z0-9:.]{0,12}"),
    )
        .prop_map(|(id, name, model)| {
            let mut entry = serde_json::Map::new();
            entry.insert("object".to_string(), json!("model"));
            if let Some(id) = id {
                entry.insert("id".to_string(), json!(id));
            }
            if let Some(name) = name {
                entry.insert("name".to_string(), json!(name));
            }
            if let Some(model) = model {
                entry.insert("model".to_string(), json!(model));
            }
            Value::Object(entry)
        })
}

fn expected_identifier(entry: &Value) -> Option<String> {
    ["id", "name", "model"]
        .iter()
        .filter_map(|f| entry.get(f).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .map(String::from)
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Reading the payload back field by field yields the same pairs in order
    #[test]
    fn prop_history_round_trips_through_payload(
        messages in proptest::collection::vec(arb_message(), 0..12),
        model in "[a-z0-9:.]{1,16}",
    ) {
        let request = ChatCompletionRequest { model: &model, messages: &messages };
        let wire = serde_json::to_string(&request).unwrap();
        let parsed: Value = serde_json::from_str(&wire).unwrap();

        prop_assert_eq!(parsed["model"].as_str(), Some(model.as_str()));
        let sent = parsed["messages"].as_array().unwrap();
        prop_assert_eq!(sent.len(), messages.len());
        for (wire_msg, original) in sent.iter().zip(&messages) {
            let role: MessageRole = serde_json::from_value(wire_msg["role"].clone()).unwrap();
            prop_assert_eq!(role, original.role);
            prop_assert_eq!(wire_msg["content"].as_str(), Some(original.content.as_str()));
        }
    }

    /// Every entry with a usable identifier is represented, in order, once
    #[test]
    fn prop_model_list_follows_field_precedence(
        entries in proptest::collection::vec(arb_model_entry(), 0..10),
    ) {
        let body = json!({ "object": "list", "data": entries.clone() });
        let models = parse_model_list(&body).unwrap();

        let mut expected: Vec<String> = Vec::new();
        for id in entries.iter().filter_map(expected_identifier) {
            if !expected.contains(&id) {
                expected.push(id);
            }
        }
        prop_assert_eq!(models, expected);
    }

    /// Decoding is total over JSON values; content comes back verbatim when present
    #[test]
    fn prop_completion_content_is_total(content in proptest::option::of(arb_content())) {
        let body = match &content {
            Some(text) => json!({
                "choices": [{ "message": { "role": "assistant", "content": text } }]
            }),
            None => json!({ "choices": [] }),
        };
        prop_assert_eq!(completion_content(&body), content.unwrap_or_default());
    }
}

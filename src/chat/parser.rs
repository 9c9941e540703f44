use serde_json::Value;
use tracing::warn;

/// Extract the text of the last content entry of the last message.
///
/// Only that entry is inspected, so malformed earlier messages do not matter.
/// Returns `None` for any shape violation on the path to it: a missing or
/// non-object envelope, an empty `messages` list, a last message with no
/// `contents`, or a last content without string `text`. Never panics.
pub fn parse_prompt_response(response: &Value) -> Option<String> {
    if !response.is_object() {
        warn!(kind = value_kind(response), "Invalid response format from chat endpoint");
        return None;
    }

    let Some(messages) = response.get("messages").and_then(Value::as_array) else {
        warn!("Invalid response format from chat endpoint: messages is not a list");
        return None;
    };
    if messages.is_empty() {
        warn!("Invalid response format from chat endpoint: no messages");
        return None;
    }
    let message = &messages[messages.len() - 1];

    let contents = match message.get("contents").and_then(Value::as_array) {
        Some(contents) if !contents.is_empty() => contents,
        _ => {
            warn!(
                messages = messages.len(),
                "Invalid response format from chat endpoint: last message has no contents"
            );
            return None;
        }
    };
    let content = &contents[contents.len() - 1];

    match content.get("text").and_then(Value::as_str) {
        Some(text) => Some(text.to_string()),
        None => {
            warn!("Invalid response format from chat endpoint: last content has no text");
            None
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

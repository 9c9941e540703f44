use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use super::actions::Action;
use crate::error::Result;

pub const FAILED_TO_GET_RESPONSE: &str = "Failed to get response";

/// Actions to perform plus the words to speak.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionAnswer {
    pub actions: Vec<Action>,
    pub answer: String,
    /// Any other fields the model emitted, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize)]
struct UncheckedAnswer {
    #[serde(default)]
    actions: Vec<String>,
    #[serde(default)]
    answer: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl ActionAnswer {
    /// Parse model output into a checked answer.
    ///
    /// The whole reply is tried as JSON first, then the span from the first
    /// `{` to the last `}` (models like to wrap the object in prose or code
    /// fences). Returns `None` unless that yields a JSON object carrying
    /// `actions` and/or `answer` of the expected types. Labels outside the
    /// vocabulary are dropped; a vocal action silences the answer.
    pub fn from_reply(text: &str) -> Option<Self> {
        let text = text.trim();
        Self::from_json(text).or_else(|| embedded_object(text).and_then(Self::from_json))
    }

    fn from_json(text: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(text).ok()?;
        let object = value.as_object()?;
        if !object.contains_key("actions") && !object.contains_key("answer") {
            return None;
        }
        let unchecked: UncheckedAnswer = serde_json::from_value(value).ok()?;

        let mut actions = Vec::with_capacity(unchecked.actions.len());
        for label in &unchecked.actions {
            match label.parse::<Action>() {
                Ok(action) if !actions.contains(&action) => actions.push(action),
                Ok(_) => {}
                Err(_) => warn!(action = %label, "Dropping action outside the vocabulary"),
            }
        }

        let mut answer = unchecked.answer.unwrap_or_default();
        if !answer.is_empty() && actions.iter().any(|a| a.is_vocal()) {
            warn!(answer = %answer, "Clearing answer that accompanies a vocal action");
            answer.clear();
        }

        Some(Self {
            actions,
            answer,
            extra: unchecked.extra,
        })
    }
}

fn embedded_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// What the assistant hands back to its caller. Never an `Err`: failures are
/// folded into [`AssistantReply::Failed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AssistantReply {
    Parsed(ActionAnswer),
    Raw { answer: String },
    Failed { error: String, details: String },
}

impl AssistantReply {
    /// Interpret reply text: a structured answer when possible, otherwise the raw text.
    pub fn from_text(text: String) -> Self {
        match ActionAnswer::from_reply(&text) {
            Some(parsed) => AssistantReply::Parsed(parsed),
            None => AssistantReply::Raw { answer: text },
        }
    }

    /// Convert a dispatch result into the soft-failure shape.
    pub fn from_dispatch(result: Result<String>) -> Self {
        match result {
            Ok(text) => Self::from_text(text),
            Err(e) => AssistantReply::Failed {
                error: FAILED_TO_GET_RESPONSE.to_string(),
                details: e.to_string(),
            },
        }
    }

    pub fn actions(&self) -> &[Action] {
        match self {
            AssistantReply::Parsed(parsed) => &parsed.actions,
            _ => &[],
        }
    }

    pub fn answer(&self) -> Option<&str> {
        match self {
            AssistantReply::Parsed(parsed) => Some(parsed.answer.as_str()),
            AssistantReply::Raw { answer } => Some(answer.as_str()),
            AssistantReply::Failed { .. } => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, AssistantReply::Failed { .. })
    }
}

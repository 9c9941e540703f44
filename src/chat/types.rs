use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Body of a non-streaming chat completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
}

impl ChatRequest {
    pub fn new(model: &str, system_prompt: &str, user_prompt: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![
                ChatMessage {
                    role: Role::System,
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: Role::User,
                    content: user_prompt.to_string(),
                },
            ],
            stream: false,
        }
    }
}

/// Response envelope returned by the chat endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponseEnvelope {
    #[serde(default)]
    pub messages: Vec<EnvelopeMessage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeMessage {
    #[serde(default)]
    pub contents: Vec<EnvelopeContent>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeContent {
    #[serde(default)]
    pub text: Option<String>,
}

impl ChatResponseEnvelope {
    /// Convenience constructor: one message per entry, each with a single text content.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            messages: texts
                .into_iter()
                .map(|text| EnvelopeMessage {
                    contents: vec![EnvelopeContent {
                        text: Some(text.into()),
                    }],
                })
                .collect(),
        }
    }
}

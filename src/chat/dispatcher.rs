use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error};

use super::interface::PromptBackend;
use super::parser::parse_prompt_response;
use super::types::ChatRequest;
use crate::error::{Result, VoiceError};
use crate::http::{with_deadline, DEFAULT_TIMEOUT};
use crate::service_config::ConfigLoader;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";
pub const DEFAULT_MODEL: &str = "llama3-groq-tool-use";
pub const NO_RESPONSE_CONTENT: &str = "No response content";

/// Sends one chat completion request per prompt to the endpoint named by
/// `CHAT_URL`. Configuration is reloaded on every call.
#[derive(Debug, Clone)]
pub struct PromptDispatcher {
    client: Client,
    config: ConfigLoader,
    model: String,
    timeout: Duration,
}

impl PromptDispatcher {
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            client: config.client().clone(),
            config,
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn request_reply(&self, user_prompt: &str, system_prompt: &str) -> Result<String> {
        let config = self.config.load_required().await?;
        let chat_url = config.chat_url()?;
        let request = ChatRequest::new(&self.model, system_prompt, user_prompt);

        debug!(url = chat_url, model = %self.model, "Sending chat request");

        let response: Value = with_deadline(self.timeout, async {
            let response = self.client.post(chat_url).json(&request).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(VoiceError::Status {
                    status: status.as_u16(),
                });
            }
            let body = response.text().await?;
            Ok(serde_json::from_str(&body)?)
        })
        .await?;

        Ok(match parse_prompt_response(&response) {
            Some(text) if !text.is_empty() => text,
            _ => NO_RESPONSE_CONTENT.to_string(),
        })
    }
}

#[async_trait]
impl PromptBackend for PromptDispatcher {
    async fn send_prompt(&self, user_prompt: &str, system_prompt: Option<&str>) -> Result<String> {
        let system_prompt = system_prompt.unwrap_or(DEFAULT_SYSTEM_PROMPT);
        self.request_reply(user_prompt, system_prompt)
            .await
            .map_err(|e| {
                error!(error = %e, "Error calling chat endpoint");
                e
            })
    }
}

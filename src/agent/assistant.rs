use std::sync::Arc;

use tracing::{error, info};

use super::persona::pidog_system_prompt;
use super::reply::AssistantReply;
use crate::chat::PromptBackend;

/// Conversational front end: fixes the Pidog persona and never fails.
pub struct PidogAssistant {
    backend: Arc<dyn PromptBackend>,
    system_prompt: String,
}

impl PidogAssistant {
    pub fn new(backend: Arc<dyn PromptBackend>) -> Self {
        Self {
            backend,
            system_prompt: pidog_system_prompt(),
        }
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Ask Pidog something. Backend errors come back as [`AssistantReply::Failed`].
    pub async fn get_prompt_response(&self, prompt: &str) -> AssistantReply {
        let result = self
            .backend
            .send_prompt(prompt, Some(&self.system_prompt))
            .await;

        if let Err(e) = &result {
            error!(error = %e, "Error in get_prompt_response");
        }

        let reply = AssistantReply::from_dispatch(result);
        info!(actions = ?reply.actions(), failed = reply.is_failure(), "Pidog replied");
        reply
    }
}

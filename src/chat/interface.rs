use async_trait::async_trait;

use crate::error::Result;

/// A backend that answers a single prompt with plain text.
#[async_trait]
pub trait PromptBackend: Send + Sync {
    /// Send `user_prompt` with an optional system instruction and return the reply text.
    async fn send_prompt(&self, user_prompt: &str, system_prompt: Option<&str>) -> Result<String>;
}

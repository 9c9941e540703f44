use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};

use crate::error::{Result, VoiceError};
use crate::http::{with_deadline, DEFAULT_TIMEOUT};
use crate::service_config::ConfigLoader;

/// Body posted to a queue: the payload travels as a JSON-encoded string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueMessage {
    pub message: String,
}

impl QueueMessage {
    pub fn encode<T: Serialize + ?Sized>(payload: &T) -> Result<Self> {
        Ok(Self {
            message: serde_json::to_string(payload)?,
        })
    }
}

/// Posts messages to `<QUEUE_URL>/<queue name>`.
#[derive(Debug, Clone)]
pub struct QueuePublisher {
    client: Client,
    config: ConfigLoader,
    timeout: Duration,
}

impl QueuePublisher {
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            client: config.client().clone(),
            config,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Publish `payload` to `queue_name` and return the endpoint's response body.
    ///
    /// An empty body yields `null`; a body that is not JSON is returned as a
    /// JSON string.
    pub async fn add_to_queue<T: Serialize + ?Sized>(
        &self,
        queue_name: &str,
        payload: &T,
    ) -> Result<Value> {
        self.publish(queue_name, payload).await.map_err(|e| {
            error!(queue = queue_name, error = %e, "Error calling queue endpoint");
            e
        })
    }

    async fn publish<T: Serialize + ?Sized>(&self, queue_name: &str, payload: &T) -> Result<Value> {
        let config = self.config.load_required().await?;
        let url = queue_endpoint(config.queue_url()?, queue_name);
        let body = QueueMessage::encode(payload)?;

        debug!(url = %url, "Posting queue message");

        with_deadline(self.timeout, async {
            let response = self.client.post(&url).json(&body).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(VoiceError::Status {
                    status: status.as_u16(),
                });
            }

            let text = response.text().await?;
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
        })
        .await
    }
}

fn queue_endpoint(base: &str, queue_name: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), queue_name)
}

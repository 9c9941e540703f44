use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::error::{Result, VoiceError};
use crate::http::{with_deadline, DEFAULT_TIMEOUT};

pub const CHAT_URL: &str = "CHAT_URL";
pub const QUEUE_URL: &str = "QUEUE_URL";

/// Flat key/value configuration shared by the chat and queue clients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ServiceConfig {
    entries: BTreeMap<String, String>,
}

impl ServiceConfig {
    /// Build from a parsed JSON document. The document must be an object whose
    /// values are scalars; non-string scalars keep their JSON text.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(VoiceError::InvalidConfig {
                message: "expected a JSON object at the top level".to_string(),
            });
        };

        let mut entries = BTreeMap::new();
        for (key, value) in map {
            let text = match value {
                Value::String(s) => s,
                Value::Array(_) | Value::Object(_) => {
                    return Err(VoiceError::InvalidConfig {
                        message: format!("value of {} must be a scalar", key),
                    });
                }
                other => other.to_string(),
            };
            entries.insert(key, text);
        }

        Ok(Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key)
            .ok_or_else(|| VoiceError::MissingConfigKey(key.to_string()))
    }

    pub fn chat_url(&self) -> Result<&str> {
        self.require(CHAT_URL)
    }

    pub fn queue_url(&self) -> Result<&str> {
        self.require(QUEUE_URL)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ServiceConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Where the configuration document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Url(String),
}

impl From<&str> for ConfigSource {
    fn from(resource: &str) -> Self {
        if resource.starts_with("http://") || resource.starts_with("https://") {
            ConfigSource::Url(resource.to_string())
        } else {
            ConfigSource::File(PathBuf::from(resource))
        }
    }
}

impl From<String> for ConfigSource {
    fn from(resource: String) -> Self {
        ConfigSource::from(resource.as_str())
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Url(url) => f.write_str(url),
        }
    }
}

/// Loads [`ServiceConfig`] fresh on every call. Failures are logged and
/// reported as `None`.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    client: Client,
    source: ConfigSource,
    timeout: Duration,
}

impl ConfigLoader {
    pub fn new(source: impl Into<ConfigSource>) -> Self {
        Self::with_client(Client::new(), source)
    }

    pub fn with_client(client: Client, source: impl Into<ConfigSource>) -> Self {
        Self {
            client,
            source: source.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    pub async fn load(&self) -> Option<ServiceConfig> {
        match self.try_load().await {
            Ok(config) => {
                debug!(source = %self.source, keys = config.len(), "Loaded service config");
                Some(config)
            }
            Err(e) => {
                error!(source = %self.source, error = %e, "Error loading config");
                None
            }
        }
    }

    /// Like [`load`](Self::load) but turns a missing document into an error
    /// for callers that cannot continue without it.
    pub async fn load_required(&self) -> Result<ServiceConfig> {
        self.load()
            .await
            .ok_or_else(|| VoiceError::ConfigUnavailable {
                resource: self.source.to_string(),
            })
    }

    async fn try_load(&self) -> Result<ServiceConfig> {
        let raw = match &self.source {
            ConfigSource::File(path) => tokio::fs::read_to_string(path).await?,
            ConfigSource::Url(url) => {
                with_deadline(self.timeout, async {
                    let response = self.client.get(url).send().await?;
                    let status = response.status();
                    if !status.is_success() {
                        return Err(VoiceError::Status {
                            status: status.as_u16(),
                        });
                    }
                    Ok(response.text().await?)
                })
                .await?
            }
        };

        let content = substitute_env(raw.trim_start_matches('\u{feff}'));
        let value: Value = serde_json::from_str(&content)?;
        ServiceConfig::from_value(value)
    }
}

/// Replace `${VAR_NAME}` with the environment value; unknown variables stay as written.
pub fn substitute_env(content: &str) -> String {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    let pattern = PLACEHOLDER
        .get_or_init(|| Regex::new(r"\$\{(\w+)\}").expect("placeholder pattern is valid"));

    pattern
        .replace_all(content, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}

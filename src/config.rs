use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, VoiceError};

/// Settings for the static page server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory the page is read from.
    #[serde(default = "default_root")]
    pub root: PathBuf,
    #[serde(default = "default_filename")]
    pub filename: String,
    #[serde(default = "default_cors")]
    pub cors: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5301
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_filename() -> String {
    "voice-recorder.html".to_string()
}

fn default_cors() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            root: default_root(),
            filename: default_filename(),
            cors: default_cors(),
        }
    }
}

impl ServerConfig {
    /// Load from a JSON or YAML file, chosen by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        let config: ServerConfig = match extension.as_deref() {
            Some("json") => serde_json::from_str(&content)?,
            _ => serde_yaml::from_str(&content)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// The page is addressed as a single path segment.
    pub fn validate(&self) -> Result<()> {
        let name = self.filename.as_str();
        let bad = name.is_empty()
            || name == "."
            || name == ".."
            || name.contains(['/', '\\', ':', '*', '{', '}']);
        if bad {
            return Err(VoiceError::InvalidConfig {
                message: format!("filename must be a plain file name, got {:?}", name),
            });
        }
        Ok(())
    }

    pub fn page_path(&self) -> PathBuf {
        self.root.join(&self.filename)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

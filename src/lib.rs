//! Voice glue for the Pidog robot dog: chat prompting with a fixed action
//! vocabulary, queue publishing, and the static page server for the voice
//! recorder front end.

pub mod agent;
pub mod chat;
pub mod config;
pub mod error;
pub mod http;
pub mod queue;
pub mod server;
pub mod service_config;

pub use agent::{Action, ActionAnswer, AssistantReply, PidogAssistant};
pub use chat::{parse_prompt_response, PromptBackend, PromptDispatcher};
pub use config::ServerConfig;
pub use error::{Result, VoiceError};
pub use queue::QueuePublisher;
pub use server::StaticServer;
pub use service_config::{ConfigLoader, ConfigSource, ServiceConfig};

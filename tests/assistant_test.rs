use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use httpmock::prelude::*;
use pidog_voice::agent::pidog_system_prompt;
use pidog_voice::{
    Action, AssistantReply, ConfigLoader, PidogAssistant, PromptBackend, PromptDispatcher,
    Result, VoiceError,
};
use serde_json::json;
use tempfile::NamedTempFile;

/// Backend returning a canned reply and remembering the system prompt it saw.
struct CannedBackend {
    reply: Mutex<Option<Result<String>>>,
    seen_system: Mutex<Option<String>>,
}

impl CannedBackend {
    fn new(reply: Result<String>) -> Arc<Self> {
        Arc::new(Self {
            reply: Mutex::new(Some(reply)),
            seen_system: Mutex::new(None),
        })
    }
}

#[async_trait]
impl PromptBackend for CannedBackend {
    async fn send_prompt(&self, _user_prompt: &str, system_prompt: Option<&str>) -> Result<String> {
        *self.seen_system.lock().unwrap() = system_prompt.map(str::to_string);
        self.reply
            .lock()
            .unwrap()
            .take()
            .expect("backend called once")
    }
}

#[tokio::test]
async fn plain_text_reply_is_wrapped_as_answer() {
    let backend = CannedBackend::new(Ok("Hello, I am Pidog.".to_string()));
    let assistant = PidogAssistant::new(backend.clone());

    let reply = assistant.get_prompt_response("who are you?").await;

    assert_eq!(serde_json::to_value(&reply).unwrap(), json!({"answer": "Hello, I am Pidog."}));
    assert_eq!(
        backend.seen_system.lock().unwrap().as_deref(),
        Some(pidog_system_prompt().as_str())
    );
}

#[tokio::test]
async fn json_reply_is_returned_unchanged() {
    let backend = CannedBackend::new(Ok(r#"{"actions":["wag tail"],"answer":"Hi!"}"#.to_string()));
    let assistant = PidogAssistant::new(backend);

    let reply = assistant.get_prompt_response("hello").await;

    assert_eq!(reply.actions(), &[Action::WagTail]);
    assert_eq!(reply.answer(), Some("Hi!"));
    assert_eq!(
        serde_json::to_value(&reply).unwrap(),
        json!({"actions": ["wag tail"], "answer": "Hi!"})
    );
}

#[tokio::test]
async fn backend_failure_becomes_an_error_object() {
    let backend = CannedBackend::new(Err(VoiceError::Status { status: 503 }));
    let assistant = PidogAssistant::new(backend);

    let reply = assistant.get_prompt_response("hello").await;

    assert_eq!(
        reply,
        AssistantReply::Failed {
            error: "Failed to get response".to_string(),
            details: "HTTP error! status: 503".to_string(),
        }
    );
    assert_eq!(reply.answer(), None);
}

#[tokio::test]
async fn end_to_end_timeout_is_soft() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat");
            then.status(200)
                .delay(Duration::from_secs(5))
                .json_body(json!({"messages": []}));
        })
        .await;

    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", json!({"CHAT_URL": server.url("/chat")})).unwrap();

    let dispatcher = PromptDispatcher::new(ConfigLoader::new(file.path().to_str().unwrap()))
        .with_timeout(Duration::from_millis(200));
    let assistant = PidogAssistant::new(Arc::new(dispatcher));

    let reply = assistant.get_prompt_response("hello").await;
    match reply {
        AssistantReply::Failed { error, details } => {
            assert_eq!(error, "Failed to get response");
            assert!(details.contains("timed out"), "details: {}", details);
        }
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn end_to_end_vocal_action_is_silenced() {
    let server = MockServer::start_async().await;
    let reply_text = r#"{"actions":["howling","sit"],"answer":"Awoo!"}"#;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/chat").body_contains("Pidog");
            then.status(200)
                .json_body(json!({"messages": [{"contents": [{"text": reply_text}]}]}));
        })
        .await;

    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", json!({"CHAT_URL": server.url("/chat")})).unwrap();

    let dispatcher = PromptDispatcher::new(ConfigLoader::new(file.path().to_str().unwrap()));
    let assistant = PidogAssistant::new(Arc::new(dispatcher));

    let reply = assistant.get_prompt_response("sing for me").await;

    mock.assert_async().await;
    assert_eq!(reply.actions(), &[Action::Howling, Action::Sit]);
    assert_eq!(reply.answer(), Some(""));
}

//! Send one utterance to Pidog and print the reply.
//!
//! Usage: `pidog-ask <config> <utterance> [queue]`
//!        `pidog-ask --actions`

use std::sync::Arc;

use anyhow::{bail, Result};
use tracing::info;

use pidog_voice::{Action, ConfigLoader, PidogAssistant, PromptDispatcher, QueuePublisher};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pidog_voice=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.first().map(String::as_str) == Some("--actions") {
        println!("{}", serde_json::to_string_pretty(&Action::catalogue())?);
        return Ok(());
    }

    let (config, utterance, queue) = match args.as_slice() {
        [config, utterance] => (config, utterance, None),
        [config, utterance, queue] => (config, utterance, Some(queue)),
        _ => bail!("usage: pidog-ask <config> <utterance> [queue] | pidog-ask --actions"),
    };

    let loader = ConfigLoader::new(config.as_str());
    let mut dispatcher = PromptDispatcher::new(loader.clone());
    if let Ok(model) = std::env::var("PIDOG_MODEL") {
        dispatcher = dispatcher.with_model(model);
    }

    let assistant = PidogAssistant::new(Arc::new(dispatcher));
    let reply = assistant.get_prompt_response(utterance).await;
    println!("{}", serde_json::to_string(&reply)?);

    if let Some(queue) = queue {
        let ack = QueuePublisher::new(loader).add_to_queue(queue, &reply).await?;
        info!(queue = %queue, ack = %ack, "Published reply");
    }

    Ok(())
}

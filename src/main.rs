use anyhow::Result;
use tracing::{debug, info};

use pidog_voice::{ServerConfig, StaticServer};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pidog_voice=debug,tower_http=debug".into()),
        )
        .init();

    let config_paths: Vec<String> = vec![
        std::env::var("SERVER_CONFIG_PATH").ok(),
        Some("server.yaml".to_string()),
        Some("server.json".to_string()),
    ]
    .into_iter()
    .flatten()
    .collect();

    let mut config = None;
    for path in &config_paths {
        if !std::path::Path::new(path).exists() {
            continue;
        }
        match ServerConfig::load(path) {
            Ok(cfg) => {
                info!("Loaded server configuration from: {}", path);
                config = Some(cfg);
                break;
            }
            Err(e) => {
                debug!("Failed to load config from {}: {}", path, e);
            }
        }
    }

    let config = config.unwrap_or_else(|| {
        info!("No server configuration found, using defaults");
        ServerConfig::default()
    });

    StaticServer::new(config)?.run().await?;

    Ok(())
}

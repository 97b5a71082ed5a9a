mod types;

pub use types::*;

use crate::Result;
use std::env;
use tracing::debug;

/// Load configuration from `CONFIG_PATH` (default `config.yaml`).
///
/// A missing file is not an error; the defaults describe a runnable server.
/// The `OPENAI_API_KEY` environment variable, when present, overrides the
/// configured QA credential.
pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    let mut config = match tokio::fs::read_to_string(&config_path).await {
        Ok(config_str) => {
            debug!("Loading configuration from: {}", config_path);
            serde_yaml::from_str(&config_str)?
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(
                "Configuration file {} not found, using defaults",
                config_path
            );
            Config::default()
        }
        Err(e) => return Err(e.into()),
    };

    if let Ok(api_key) = env::var("OPENAI_API_KEY") {
        if !api_key.is_empty() {
            config.qa.api_key = api_key;
        }
    }

    Ok(config)
}

//! Shared wiring for commands: credentials and model clients.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::domain::models::Config;
use crate::domain::ports::{CompletionClient, EmbeddingProvider};
use crate::infrastructure::credentials::resolve_api_key;
use crate::infrastructure::openai::{
    OpenAiClient, OpenAiClientConfig, OpenAiEmbeddingConfig, OpenAiEmbeddingProvider,
};

/// Everything a command needs to talk to the model endpoints.
pub struct AppContext {
    pub config: Config,
    pub client: Arc<dyn CompletionClient>,
    pub embedder: Arc<dyn EmbeddingProvider>,
}

impl AppContext {
    /// Resolve the API key and build both clients; fails before any request is sent.
    pub fn from_config(config: Config) -> Result<Self> {
        let api_key = resolve_api_key()?;

        let client = OpenAiClient::new(OpenAiClientConfig::from_config(&config, api_key.clone()))
            .context("Failed to create chat completions client")?;
        let embedder = OpenAiEmbeddingProvider::new(OpenAiEmbeddingConfig::from_config(
            &config, api_key,
        ))
        .context("Failed to create embedding provider")?;

        Ok(Self {
            config,
            client: Arc::new(client),
            embedder: Arc::new(embedder),
        })
    }

    /// Build a context around clients that are already constructed.
    pub fn with_clients(
        config: Config,
        client: Arc<dyn CompletionClient>,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> Self {
        Self {
            config,
            client,
            embedder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_fails_fast() {
        temp_env::with_var_unset("OPENAI_API_KEY", || {
            let err = AppContext::from_config(Config::default())
                .err()
                .expect("missing key must fail");
            assert!(err.to_string().contains("OPENAI_API_KEY"));
        });
    }

    #[test]
    fn test_builds_with_api_key() {
        temp_env::with_var("OPENAI_API_KEY", Some("sk-test-key-123456"), || {
            assert!(AppContext::from_config(Config::default()).is_ok());
        });
    }
}

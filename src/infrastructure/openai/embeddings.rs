//! OpenAI embedding provider adapter.
//!
//! Calls the `/embeddings` endpoint of any OpenAI-compatible API. The router
//! uses it to score steps against agent descriptions.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use super::errors::OpenAiApiError;
use super::rate_limiter::RateLimiter;
use super::retry::RetryPolicy;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::Config;
use crate::domain::ports::embedding::{EmbeddingInput, EmbeddingOutput, EmbeddingProvider};
use crate::infrastructure::logging::secret_scrubbing::SecretScrubber;

/// Configuration for the OpenAI embedding provider.
#[derive(Debug, Clone)]
pub struct OpenAiEmbeddingConfig {
    /// API key sent as a Bearer token.
    pub api_key: String,
    /// Base URL for the API. Default: `https://api.openai.com/v1`.
    pub base_url: String,
    /// Embedding model. Default: `text-embedding-3-large`.
    pub model: String,
    /// Request timeout in seconds. Default: 30.
    pub timeout_secs: u64,
    /// Maximum texts per single API request. Default: 2048.
    pub max_batch_size: usize,
    /// Requests per second; non-positive disables throttling.
    pub rate_limit_rps: f64,
    /// Retries on transient failures; 0 disables retries.
    pub max_retries: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

impl Default for OpenAiEmbeddingConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: "text-embedding-3-large".to_string(),
            timeout_secs: 30,
            max_batch_size: 2048,
            rate_limit_rps: 10.0,
            max_retries: 3,
            initial_backoff_ms: 1_000,
            max_backoff_ms: 30_000,
        }
    }
}

impl OpenAiEmbeddingConfig {
    /// Endpoint and model from the `embedding` section (base URL falls back to
    /// `llm.base_url`); throttling and retries shared with the chat client.
    pub fn from_config(config: &Config, api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: config
                .embedding
                .base_url
                .clone()
                .unwrap_or_else(|| config.llm.base_url.clone()),
            model: config.embedding.model.clone(),
            rate_limit_rps: config.rate_limit.requests_per_second,
            max_retries: config.retry.max_retries,
            initial_backoff_ms: config.retry.initial_backoff_ms,
            max_backoff_ms: config.retry.max_backoff_ms,
            ..Default::default()
        }
    }
}

/// OpenAI embedding provider.
///
/// Requests wait on the rate limiter and run under the retry policy, like
/// chat completions.
pub struct OpenAiEmbeddingProvider {
    config: OpenAiEmbeddingConfig,
    client: reqwest::Client,
    rate_limiter: RateLimiter,
    retry_policy: RetryPolicy,
}

impl OpenAiEmbeddingProvider {
    pub fn new(config: OpenAiEmbeddingConfig) -> DomainResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DomainError::Configuration(format!("Failed to build HTTP client: {e}")))?;
        let rate_limiter = RateLimiter::new(config.rate_limit_rps);
        let retry_policy = RetryPolicy::new(
            config.max_retries,
            config.initial_backoff_ms,
            config.max_backoff_ms,
        );
        Ok(Self {
            config,
            client,
            rate_limiter,
            retry_policy,
        })
    }

    async fn call_embeddings_api(&self, texts: Vec<String>) -> DomainResult<Vec<Vec<f32>>> {
        debug!(count = texts.len(), model = %self.config.model, "requesting embeddings");
        let request = EmbeddingsRequest {
            model: self.config.model.clone(),
            input: texts,
        };

        self.rate_limiter.acquire().await;
        let result = self
            .retry_policy
            .execute(|| self.send_embeddings(&request))
            .await
            .map_err(embedding_error)?;

        // Sort by index to maintain input order
        let mut data = result.data;
        data.sort_by_key(|d| d.index);

        Ok(data.into_iter().map(|d| d.embedding).collect())
    }

    /// One POST to `/embeddings` (called by the retry policy).
    async fn send_embeddings(
        &self,
        request: &EmbeddingsRequest,
    ) -> Result<EmbeddingsResponse, OpenAiApiError> {
        let url = format!("{}/embeddings", self.config.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(request)
            .send()
            .await
            .map_err(OpenAiApiError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read response body".to_string());
            warn!("embeddings API error ({}): {}", status, SecretScrubber::new().scrub_message(&body));
            return Err(OpenAiApiError::from_status(status, body));
        }

        let body = response.text().await.map_err(OpenAiApiError::from_transport)?;
        Ok(serde_json::from_str(&body)?)
    }
}

fn embedding_error(err: OpenAiApiError) -> DomainError {
    match err {
        OpenAiApiError::JsonError(e) => {
            DomainError::SerializationError(format!("Failed to parse embedding response: {e}"))
        }
        other => DomainError::EmbeddingFailed(other.to_string()),
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbeddingProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn embed(&self, text: &str) -> DomainResult<Vec<f32>> {
        let results = self.call_embeddings_api(vec![text.to_string()]).await?;
        results
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::EmbeddingFailed("Empty embedding response".to_string()))
    }

    async fn embed_batch(&self, inputs: &[EmbeddingInput]) -> DomainResult<Vec<EmbeddingOutput>> {
        if inputs.is_empty() {
            return Ok(Vec::new());
        }

        let mut all_outputs = Vec::with_capacity(inputs.len());

        for chunk in inputs.chunks(self.config.max_batch_size.max(1)) {
            let texts: Vec<String> = chunk.iter().map(|i| i.text.clone()).collect();
            let vectors = self.call_embeddings_api(texts).await?;

            if vectors.len() != chunk.len() {
                return Err(DomainError::EmbeddingFailed(format!(
                    "Expected {} embeddings, got {}",
                    chunk.len(),
                    vectors.len()
                )));
            }

            for (input, vector) in chunk.iter().zip(vectors) {
                all_outputs.push(EmbeddingOutput {
                    id: input.id.clone(),
                    vector,
                });
            }
        }

        Ok(all_outputs)
    }
}

// -- OpenAI API request/response types --

#[derive(Debug, Serialize)]
struct EmbeddingsRequest {
    model: String,
    input: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}

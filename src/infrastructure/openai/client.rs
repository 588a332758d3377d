use async_trait::async_trait;
use reqwest::{header, Client as ReqwestClient, Response};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use super::errors::OpenAiApiError;
use super::rate_limiter::RateLimiter;
use super::retry::RetryPolicy;
use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::domain::errors::DomainResult;
use crate::domain::models::Config;
use crate::domain::ports::{CompletionClient, CompletionRequest};
use crate::infrastructure::logging::secret_scrubbing::{redact_api_key, SecretScrubber};

/// Configuration for the chat completions client
#[derive(Debug, Clone)]
pub struct OpenAiClientConfig {
    /// API key sent as a Bearer token
    pub api_key: String,

    /// Base URL, e.g. `https://api.openai.com/v1`
    pub base_url: String,

    /// Model name sent with every request
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Rate limit in requests per second
    pub rate_limit_rps: f64,

    /// Maximum retry attempts; 0 disables retries
    pub max_retries: u32,

    /// Initial backoff delay in milliseconds
    pub initial_backoff_ms: u64,

    /// Maximum backoff delay in milliseconds
    pub max_backoff_ms: u64,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OpenAiClientConfig {
    /// Build a client config from the loaded application config
    pub fn from_config(config: &Config, api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: config.llm.base_url.clone(),
            model: config.llm.model.clone(),
            temperature: config.llm.temperature,
            rate_limit_rps: config.rate_limit.requests_per_second,
            max_retries: config.retry.max_retries,
            initial_backoff_ms: config.retry.initial_backoff_ms,
            max_backoff_ms: config.retry.max_backoff_ms,
            timeout_secs: config.llm.timeout_secs,
        }
    }
}

impl Default for OpenAiClientConfig {
    fn default() -> Self {
        Self::from_config(&Config::default(), String::new())
    }
}

/// HTTP client for an OpenAI-compatible chat completions endpoint
///
/// Every request waits on the rate limiter, then runs under the retry policy.
pub struct OpenAiClient {
    http_client: ReqwestClient,
    base_url: String,
    model: String,
    temperature: f32,
    rate_limiter: RateLimiter,
    retry_policy: RetryPolicy,
}

impl OpenAiClient {
    /// Create a new client
    ///
    /// # Example
    /// ```no_run
    /// use agentflow::infrastructure::openai::{OpenAiClient, OpenAiClientConfig};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = OpenAiClientConfig {
    ///     api_key: "sk-test".to_string(),
    ///     ..Default::default()
    /// };
    /// let client = OpenAiClient::new(config)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: OpenAiClientConfig) -> Result<Self, OpenAiApiError> {
        info!(
            base_url = %config.base_url,
            model = %config.model,
            rate_limit_rps = config.rate_limit_rps,
            timeout_secs = config.timeout_secs,
            api_key = %redact_api_key(&config.api_key),
            "initializing chat completions client"
        );

        let mut headers = header::HeaderMap::new();
        let bearer = header::HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|e| OpenAiApiError::InvalidRequest(format!("Invalid API key: {e}")))?;
        headers.insert(header::AUTHORIZATION, bearer);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let http_client = ReqwestClient::builder()
            .pool_max_idle_per_host(10)
            .timeout(Duration::from_secs(config.timeout_secs))
            .tcp_nodelay(true)
            .default_headers(headers)
            .build()
            .map_err(OpenAiApiError::NetworkError)?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model,
            temperature: config.temperature,
            rate_limiter: RateLimiter::new(config.rate_limit_rps),
            retry_policy: RetryPolicy::new(
                config.max_retries,
                config.initial_backoff_ms,
                config.max_backoff_ms,
            ),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a chat completion request and get the raw response
    #[instrument(skip(self, request), fields(model = %request.model, messages = request.messages.len()))]
    pub async fn send_chat(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, OpenAiApiError> {
        self.rate_limiter.acquire().await;

        let response = self
            .retry_policy
            .execute(|| self.execute_chat_request(&request))
            .await?;

        if let Some(usage) = response.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "chat completion succeeded"
            );
        }

        Ok(response)
    }

    /// Build the wire request for a single-turn prompt
    pub fn build_request(&self, request: &CompletionRequest) -> ChatCompletionRequest {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &request.system {
            messages.push(ChatMessage::system(system.clone()));
        }
        messages.push(ChatMessage::user(request.user.clone()));

        ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            temperature: Some(self.temperature),
        }
    }

    /// Execute a single request (called by the retry policy)
    async fn execute_chat_request(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, OpenAiApiError> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!("POST {}", url);

        let response = self
            .http_client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(OpenAiApiError::from_transport)?;

        Self::handle_response(response).await
    }

    async fn handle_response(response: Response) -> Result<ChatCompletionResponse, OpenAiApiError> {
        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            warn!("API error ({}): {}", status, SecretScrubber::new().scrub_message(&body));
            return Err(OpenAiApiError::from_status(status, body));
        }

        let body = response.text().await.map_err(OpenAiApiError::from_transport)?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> DomainResult<String> {
        let chat_request = self.build_request(&request);
        let response = self.send_chat(chat_request).await?;

        response
            .first_text()
            .map(|text| text.trim().to_string())
            .ok_or_else(|| OpenAiApiError::EmptyResponse.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> OpenAiClientConfig {
        OpenAiClientConfig {
            api_key: "sk-test-key".to_string(),
            base_url: "https://api.test.com/v1/".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_client_creation_trims_base_url() {
        let client = OpenAiClient::new(test_config()).unwrap();
        assert_eq!(client.base_url, "https://api.test.com/v1");
        assert_eq!(client.model(), "gpt-3.5-turbo");
    }

    #[test]
    fn test_invalid_api_key_header() {
        let config = OpenAiClientConfig {
            api_key: "bad\nkey".to_string(),
            ..test_config()
        };
        assert!(matches!(
            OpenAiClient::new(config),
            Err(OpenAiApiError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_build_request_with_and_without_system() {
        let client = OpenAiClient::new(test_config()).unwrap();

        let direct = client.build_request(&CompletionRequest::user("What is the capital of France?"));
        assert_eq!(direct.messages.len(), 1);
        assert_eq!(direct.messages[0].role, "user");

        let persona = client.build_request(&CompletionRequest::with_system(
            "You are a professor",
            "What is the capital of France?",
        ));
        assert_eq!(persona.messages.len(), 2);
        assert_eq!(persona.messages[0], ChatMessage::system("You are a professor"));
        assert_eq!(persona.temperature, Some(0.0));
    }
}

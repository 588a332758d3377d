pub mod client;
pub mod embeddings;
pub mod errors;
pub mod rate_limiter;
pub mod retry;
pub mod types;

pub use client::{OpenAiClient, OpenAiClientConfig};
pub use embeddings::{OpenAiEmbeddingConfig, OpenAiEmbeddingProvider};
pub use errors::OpenAiApiError;
pub use rate_limiter::RateLimiter;
pub use retry::RetryPolicy;
pub use types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Usage};

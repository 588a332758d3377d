pub mod agent;
pub mod config;
pub mod evaluation;

pub use agent::{AgentDescriptor, RouteDecision};
pub use config::{
    Config, EmbeddingConfig, EvaluationConfig, LlmConfig, LoggingConfig, RateLimitConfig,
    RetryConfig, WorkflowConfig,
};
pub use evaluation::{EvaluationOutcome, EvaluationResult, Verdict};

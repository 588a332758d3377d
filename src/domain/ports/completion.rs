//! Completion port - the single model call every agent is built on.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;

/// A single-turn prompt: optional system instruction plus one user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system: Option<String>,
    pub user: String,
}

impl CompletionRequest {
    /// A request with no system instruction.
    pub fn user(user: impl Into<String>) -> Self {
        Self {
            system: None,
            user: user.into(),
        }
    }

    pub fn with_system(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: Some(system.into()),
            user: user.into(),
        }
    }
}

/// Trait for text-completion backends.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send the request and return the model's text answer.
    async fn complete(&self, request: CompletionRequest) -> DomainResult<String>;
}

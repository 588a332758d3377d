//! The simplest agent: forwards the prompt to the model unchanged.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

use crate::domain::errors::DomainResult;
use crate::domain::ports::{Agent, CompletionClient, CompletionRequest};

/// Sends the user prompt with no system instruction.
pub struct DirectPromptAgent {
    client: Arc<dyn CompletionClient>,
}

impl DirectPromptAgent {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Agent for DirectPromptAgent {
    #[instrument(skip(self, input), fields(agent = "direct"))]
    async fn respond(&self, input: &str) -> DomainResult<String> {
        self.client.complete(CompletionRequest::user(input)).await
    }
}

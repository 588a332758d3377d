//! Persona agent: the direct agent plus a fixed system instruction.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

use crate::domain::errors::DomainResult;
use crate::domain::ports::{Agent, CompletionClient, CompletionRequest};

/// Answers every prompt in character as `persona`.
pub struct AugmentedPromptAgent {
    client: Arc<dyn CompletionClient>,
    persona: String,
}

impl AugmentedPromptAgent {
    pub fn new(client: Arc<dyn CompletionClient>, persona: impl Into<String>) -> Self {
        Self {
            client,
            persona: persona.into(),
        }
    }

    pub fn persona(&self) -> &str {
        &self.persona
    }

    /// System instruction sent with every request.
    pub fn system_prompt(&self) -> String {
        format!("{}. Forget all previous context.", self.persona)
    }
}

#[async_trait]
impl Agent for AugmentedPromptAgent {
    #[instrument(skip(self, input), fields(agent = "augmented"))]
    async fn respond(&self, input: &str) -> DomainResult<String> {
        self.client
            .complete(CompletionRequest::with_system(self.system_prompt(), input))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::mock::MockCompletionClient;

    const PROFESSOR: &str =
        "You are a college professor; your answers always start with: 'Dear students,'";

    #[tokio::test]
    async fn test_persona_becomes_system_message() {
        let client = Arc::new(MockCompletionClient::constant("Dear students, it is Paris."));
        let agent = AugmentedPromptAgent::new(client.clone(), PROFESSOR);

        let answer = agent.respond("What is the Capital of France?").await.unwrap();
        assert!(answer.starts_with("Dear students"));

        let request = &client.requests()[0];
        assert_eq!(
            request.system.as_deref(),
            Some(format!("{PROFESSOR}. Forget all previous context.").as_str())
        );
        assert_eq!(request.user, "What is the Capital of France?");
    }
}

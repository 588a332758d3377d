//! Knowledge agent: a persona that must answer only from supplied knowledge.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

use crate::domain::errors::DomainResult;
use crate::domain::ports::{Agent, CompletionClient, CompletionRequest};

/// Answers strictly from `knowledge`, ignoring what the model already knows.
pub struct KnowledgeAgent {
    client: Arc<dyn CompletionClient>,
    persona: String,
    knowledge: String,
}

impl KnowledgeAgent {
    pub fn new(
        client: Arc<dyn CompletionClient>,
        persona: impl Into<String>,
        knowledge: impl Into<String>,
    ) -> Self {
        Self {
            client,
            persona: persona.into(),
            knowledge: knowledge.into(),
        }
    }

    pub fn knowledge(&self) -> &str {
        &self.knowledge
    }

    pub fn system_prompt(&self) -> String {
        format!(
            "You are {} knowledge-based assistant. Forget all previous context.",
            self.persona
        )
    }

    /// User message: the knowledge block, then the prompt.
    pub fn user_prompt(&self, prompt: &str) -> String {
        format!(
            "Use only the following knowledge to answer, do not use your own knowledge: {}\n\
             Answer the prompt based on this knowledge, not your own.\n\n\
             Prompt: {prompt}",
            self.knowledge
        )
    }
}

#[async_trait]
impl Agent for KnowledgeAgent {
    #[instrument(skip(self, input), fields(agent = "knowledge"))]
    async fn respond(&self, input: &str) -> DomainResult<String> {
        self.client
            .complete(CompletionRequest::with_system(
                self.system_prompt(),
                self.user_prompt(input),
            ))
            .await
    }
}

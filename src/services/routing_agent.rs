//! Routing agent: pick the best-matching worker for a prompt and delegate.
//!
//! The prompt and every agent description are embedded; the description with
//! the highest cosine similarity wins. Ties go to the agent registered first.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{AgentDescriptor, RouteDecision};
use crate::domain::ports::{Agent, EmbeddingInput, EmbeddingProvider};

/// Delegates each prompt to the registered agent whose description is most
/// similar to it.
pub struct RoutingAgent {
    embedder: Arc<dyn EmbeddingProvider>,
    agents: Vec<AgentDescriptor>,
}

impl RoutingAgent {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, agents: Vec<AgentDescriptor>) -> Self {
        Self { embedder, agents }
    }

    /// Register one more agent after the existing ones.
    #[must_use]
    pub fn with_agent(mut self, descriptor: AgentDescriptor) -> Self {
        self.agents.push(descriptor);
        self
    }

    pub fn agents(&self) -> &[AgentDescriptor] {
        &self.agents
    }

    /// Score every agent against `prompt` and pick one, without invoking it.
    #[instrument(skip(self, prompt), fields(agents = self.agents.len(), embedder = self.embedder.name()))]
    pub async fn select(&self, prompt: &str) -> DomainResult<RouteDecision> {
        if self.agents.is_empty() {
            return Err(DomainError::Configuration(
                "routing agent has no agents registered".to_string(),
            ));
        }

        let prompt_vector = self.embedder.embed(prompt).await?;
        let inputs: Vec<EmbeddingInput> = self
            .agents
            .iter()
            .enumerate()
            .map(|(i, agent)| EmbeddingInput {
                id: i.to_string(),
                text: agent.description.clone(),
            })
            .collect();
        let descriptions = self.embedder.embed_batch(&inputs).await?;
        if descriptions.len() != self.agents.len() {
            return Err(DomainError::EmbeddingFailed(format!(
                "expected {} description embeddings, got {}",
                self.agents.len(),
                descriptions.len()
            )));
        }

        let scores: Vec<(String, f32)> = self
            .agents
            .iter()
            .zip(&descriptions)
            .map(|(agent, output)| {
                let score = cosine_similarity(&prompt_vector, &output.vector);
                debug!(agent = %agent.name, score, "similarity");
                (agent.name.clone(), score)
            })
            .collect();

        let (index, score) = best_match(scores.iter().map(|(_, s)| *s)).ok_or_else(|| {
            DomainError::InvalidResponse("no agent produced a finite similarity score".to_string())
        })?;

        Ok(RouteDecision {
            agent_name: self.agents[index].name.clone(),
            index,
            score,
            scores,
        })
    }

    /// Select an agent and invoke it exactly once with `prompt`.
    #[instrument(skip(self, prompt))]
    pub async fn route(&self, prompt: &str) -> DomainResult<(RouteDecision, String)> {
        let decision = self.select(prompt).await?;
        info!(agent = %decision.agent_name, score = decision.score, "routing prompt");

        let response = self.agents[decision.index].agent.respond(prompt).await?;
        Ok((decision, response))
    }
}

#[async_trait]
impl Agent for RoutingAgent {
    async fn respond(&self, input: &str) -> DomainResult<String> {
        Ok(self.route(input).await?.1)
    }
}

/// Cosine similarity of two vectors.
///
/// Mismatched lengths, empty vectors and zero-norm vectors score 0.0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
}

/// Index and value of the highest finite score; earlier entries win ties.
fn best_match(scores: impl Iterator<Item = f32>) -> Option<(usize, f32)> {
    scores
        .enumerate()
        .filter(|(_, score)| score.is_finite())
        .fold(None, |best, (i, score)| match best {
            Some((_, best_score)) if score <= best_score => best,
            _ => Some((i, score)),
        })
}

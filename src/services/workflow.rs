//! Product-development workflow: plan, then route every step to a job function.
//!
//! Three job functions (product manager, program manager, development
//! engineer) each pair a knowledge agent with an evaluation agent. The
//! planner breaks the workflow prompt into steps and the router sends each
//! step to the job function whose description fits best. Steps run strictly
//! in order.

use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::action_planning_agent::ActionPlanningAgent;
use super::evaluation_agent::EvaluationAgent;
use super::knowledge_agent::KnowledgeAgent;
use super::routing_agent::RoutingAgent;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::AgentDescriptor;
use crate::domain::ports::{CompletionClient, EmbeddingProvider};

pub const DEFAULT_WORKFLOW_PROMPT: &str = "What would the development tasks for this product be?";

/// How the planner decomposes a product into a development plan.
pub const PLANNING_KNOWLEDGE: &str = "Stories are defined from a product spec by identifying a \
persona, an action, and a desired outcome for each story. Each story represents a specific \
functionality of the product described in the specification.\n\
Features are defined by grouping related user stories.\n\
Tasks are defined for each story and represent the engineering work required to develop the \
product.\n\
A development Plan for a product contains all these components";

pub const EVALUATOR_PERSONA: &str =
    "You are an evaluation agent that checks the answers of other worker agents";

/// One role in the workflow: the worker's persona and knowledge, the
/// evaluator's criteria, and the description the router scores against.
#[derive(Debug, Clone)]
pub struct JobFunction {
    pub name: String,
    pub description: String,
    pub persona: String,
    pub knowledge: String,
    pub criteria: String,
}

impl JobFunction {
    /// Wrap a knowledge agent in an evaluation agent and describe it for the router.
    pub fn into_descriptor(
        self,
        client: Arc<dyn CompletionClient>,
        max_iterations: u32,
    ) -> AgentDescriptor {
        let worker = Arc::new(KnowledgeAgent::new(
            client.clone(),
            self.persona,
            self.knowledge,
        ));
        let evaluator = EvaluationAgent::new(client, worker, EVALUATOR_PERSONA, self.criteria)
            .with_max_iterations(max_iterations);
        AgentDescriptor::new(self.name, self.description, Arc::new(evaluator))
    }
}

/// The three job functions, with the product spec embedded in the product
/// manager's knowledge.
pub fn job_functions(product_spec: &str) -> Vec<JobFunction> {
    vec![
        JobFunction {
            name: "Product Manager".to_string(),
            description: "Responsible for defining product personas and user stories only. \
                          Does not define features or tasks. Does not group stories."
                .to_string(),
            persona: "You are a Product Manager, you are responsible for defining the user \
                      stories for a product."
                .to_string(),
            knowledge: format!(
                "Stories are defined by writing sentences with a persona, an action, and a \
                 desired outcome. The sentences always start with: As a \
                 Write several stories for the product spec below, where the personas are the \
                 different users of the product.\n\nProduct Spec:\n{product_spec}"
            ),
            criteria: "The answer should be stories that follow the following structure: \
                       As a [type of user], I want [an action or feature] so that \
                       [benefit/value]."
                .to_string(),
        },
        JobFunction {
            name: "Program Manager".to_string(),
            description: "Responsible for defining product features only, by grouping related \
                          user stories. Does not define development tasks."
                .to_string(),
            persona: "You are a Program Manager, you are responsible for defining the features \
                      for a product."
                .to_string(),
            knowledge: "Features of a product are defined by organizing similar user stories \
                        into cohesive groups."
                .to_string(),
            criteria: "The answer should be product features that follow the following \
                       structure: \
                       Feature Name: A clear, concise title that identifies the capability\n\
                       Description: A brief explanation of what the feature does and its purpose\n\
                       Key Functionality: The specific capabilities or actions the feature provides\n\
                       User Benefit: How this feature creates value for the user"
                .to_string(),
        },
        JobFunction {
            name: "Development Engineer".to_string(),
            description: "Responsible for defining development tasks only, based on user \
                          stories and features."
                .to_string(),
            persona: "You are a Development Engineer, you are responsible for defining the \
                      development tasks for a product."
                .to_string(),
            knowledge: "Development tasks are defined by identifying what needs to be built to \
                        implement each user story."
                .to_string(),
            criteria: "The answer should be tasks following this exact structure: \
                       Task ID: A unique identifier for tracking purposes\n\
                       Task Title: Brief description of the specific development work\n\
                       Related User Story: Reference to the parent user story\n\
                       Description: Detailed explanation of the technical work required\n\
                       Acceptance Criteria: Specific requirements that must be met for completion\n\
                       Estimated Effort: Time or complexity estimation\n\
                       Dependencies: Any tasks that must be completed first"
                .to_string(),
        },
    ]
}

/// Read the product specification the workflow plans against.
pub async fn load_product_spec(path: impl AsRef<Path>) -> DomainResult<String> {
    let path = path.as_ref();
    let spec = tokio::fs::read_to_string(path).await.map_err(|e| {
        DomainError::Configuration(format!(
            "failed to read product spec {}: {e}",
            path.display()
        ))
    })?;
    if spec.trim().is_empty() {
        warn!(path = %path.display(), "product spec is empty");
    }
    Ok(spec)
}

/// Result of one executed step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepOutcome {
    /// 1-based position in the plan.
    pub index: usize,
    pub step: String,
    /// Job function the router picked.
    pub agent_name: String,
    pub response: String,
}

/// Everything one workflow run produced, in step order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowReport {
    pub run_id: Uuid,
    pub prompt: String,
    pub steps: Vec<StepOutcome>,
}

impl WorkflowReport {
    /// The last step's response, which is the workflow's answer.
    pub fn final_output(&self) -> Option<&str> {
        self.steps.last().map(|s| s.response.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Plans a prompt, then hands each step to the router one at a time.
pub struct WorkflowRunner {
    planner: ActionPlanningAgent,
    router: RoutingAgent,
}

impl WorkflowRunner {
    pub fn new(planner: ActionPlanningAgent, router: RoutingAgent) -> Self {
        Self { planner, router }
    }

    /// Wire the planner and the three job functions for `product_spec`.
    pub fn for_product_spec(
        client: Arc<dyn CompletionClient>,
        embedder: Arc<dyn EmbeddingProvider>,
        product_spec: &str,
        max_iterations: u32,
    ) -> Self {
        let agents = job_functions(product_spec)
            .into_iter()
            .map(|job| job.into_descriptor(client.clone(), max_iterations))
            .collect();
        Self::new(
            ActionPlanningAgent::new(client, PLANNING_KNOWLEDGE),
            RoutingAgent::new(embedder, agents),
        )
    }

    /// Plan `prompt` and route each step in order.
    ///
    /// An empty plan is not an error; the report simply has no steps.
    #[instrument(skip(self, prompt), fields(run_id = tracing::field::Empty))]
    pub async fn run(&self, prompt: &str) -> DomainResult<WorkflowReport> {
        let run_id = Uuid::new_v4();
        tracing::Span::current().record("run_id", tracing::field::display(run_id));

        let steps = self.planner.extract_steps(prompt).await?;
        if steps.is_empty() {
            warn!("planner returned no steps");
        }

        let mut outcomes = Vec::with_capacity(steps.len());
        for (i, step) in steps.into_iter().enumerate() {
            let index = i + 1;
            info!(index, step = %step, "executing step");
            let (decision, response) = self.router.route(&step).await?;
            outcomes.push(StepOutcome {
                index,
                step,
                agent_name: decision.agent_name,
                response,
            });
        }

        info!(steps = outcomes.len(), "workflow complete");
        Ok(WorkflowReport {
            run_id,
            prompt: prompt.to_string(),
            steps: outcomes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_functions_embed_product_spec() {
        let jobs = job_functions("Email Router: routes support email.");
        assert_eq!(jobs.len(), 3);
        assert_eq!(jobs[0].name, "Product Manager");
        assert!(jobs[0].knowledge.ends_with("Product Spec:\nEmail Router: routes support email."));
        assert!(jobs[2].criteria.contains("Task ID"));
    }

    #[test]
    fn test_final_output_is_last_step() {
        let mut report = WorkflowReport {
            run_id: Uuid::nil(),
            prompt: "p".to_string(),
            steps: Vec::new(),
        };
        assert!(report.is_empty());
        assert_eq!(report.final_output(), None);

        for (index, response) in [(1, "stories"), (2, "tasks")] {
            report.steps.push(StepOutcome {
                index,
                step: format!("step {index}"),
                agent_name: "a".to_string(),
                response: response.to_string(),
            });
        }
        assert_eq!(report.final_output(), Some("tasks"));
    }

    #[tokio::test]
    async fn test_load_missing_product_spec() {
        let err = load_product_spec("/definitely/not/here.txt").await.unwrap_err();
        assert!(matches!(err, DomainError::Configuration(msg) if msg.contains("not/here.txt")));
    }
}

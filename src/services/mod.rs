//! Agents and the workflow built on the domain ports.

pub mod action_planning_agent;
pub mod augmented_prompt_agent;
pub mod direct_prompt_agent;
pub mod evaluation_agent;
pub mod knowledge_agent;
pub mod routing_agent;
pub mod workflow;

pub use action_planning_agent::{parse_steps, ActionPlanningAgent};
pub use augmented_prompt_agent::AugmentedPromptAgent;
pub use direct_prompt_agent::DirectPromptAgent;
pub use evaluation_agent::{EvaluationAgent, DEFAULT_MAX_ITERATIONS};
pub use knowledge_agent::KnowledgeAgent;
pub use routing_agent::{cosine_similarity, RoutingAgent};
pub use workflow::{JobFunction, StepOutcome, WorkflowReport, WorkflowRunner};

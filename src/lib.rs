//! agentflow - prompt agents, evaluation loops and routed workflows
//!
//! A small set of agents built on one OpenAI-compatible chat completions
//! endpoint:
//!
//! - **Direct, persona and knowledge agents**: single model calls with
//!   progressively stronger system instructions
//! - **Action planning agent**: turns a prompt into ordered steps
//! - **Evaluation agent**: bounded worker / judge / revise loop
//! - **Routing agent**: picks a worker by embedding similarity
//! - **Workflow**: plan, then route each step to a job function
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): errors, models and port traits
//! - **Service Layer** (`services`): the agents and the workflow
//! - **Infrastructure Layer** (`infrastructure`): HTTP clients, config,
//!   credentials, logging and test doubles
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use agentflow::domain::ports::Agent;
//! use agentflow::infrastructure::openai::{OpenAiClient, OpenAiClientConfig};
//! use agentflow::services::AugmentedPromptAgent;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = OpenAiClient::new(OpenAiClientConfig {
//!     api_key: std::env::var("OPENAI_API_KEY")?,
//!     ..Default::default()
//! })?;
//! let agent = AugmentedPromptAgent::new(Arc::new(client), "You are a college professor");
//! println!("{}", agent.respond("What is the capital of France?").await?);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{
    AgentDescriptor, Config, EvaluationOutcome, EvaluationResult, RouteDecision, Verdict,
};
pub use domain::ports::{Agent, CompletionClient, CompletionRequest, EmbeddingProvider};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{
    ActionPlanningAgent, AugmentedPromptAgent, DirectPromptAgent, EvaluationAgent,
    KnowledgeAgent, RoutingAgent, WorkflowReport, WorkflowRunner,
};

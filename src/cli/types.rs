//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::commands::{
    augmented::AugmentedArgs, direct::DirectArgs, evaluate::EvaluateArgs,
    knowledge::KnowledgeArgs, plan::PlanArgs, route::RouteArgs, workflow::WorkflowArgs,
};

#[derive(Parser, Debug)]
#[command(name = "agentflow")]
#[command(about = "Prompt agents, evaluation loops and routed workflows over an OpenAI-compatible API", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (default: agentflow.yaml, .agentflow/local.yaml, AGENTFLOW_* env)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a prompt straight to the model
    Direct(DirectArgs),

    /// Answer in character as a persona
    Augmented(AugmentedArgs),

    /// Answer strictly from supplied knowledge
    Knowledge(KnowledgeArgs),

    /// Break a prompt into ordered steps
    Plan(PlanArgs),

    /// Answer with a knowledge agent checked by an evaluation loop
    Evaluate(EvaluateArgs),

    /// Route prompts to the best-matching specialist agent
    Route(RouteArgs),

    /// Run the product-development workflow against a product spec
    Workflow(WorkflowArgs),
}

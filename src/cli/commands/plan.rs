//! `agentflow plan`: break a prompt into ordered steps.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::context::AppContext;
use crate::cli::output::{create_spinner_with_message, output, CommandOutput, ProgressBarExt};
use crate::services::ActionPlanningAgent;

pub const DEFAULT_PLAN_PROMPT: &str = "One morning I wanted to have scrambled eggs";

/// Built-in planning knowledge: three egg recipes.
pub const EGG_RECIPES: &str = include_str!("../../../data/egg-recipes.md");

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Prompt to plan
    #[arg(default_value = DEFAULT_PLAN_PROMPT)]
    pub prompt: String,

    /// File with the planning knowledge (default: built-in egg recipes)
    #[arg(short, long, value_name = "PATH")]
    pub knowledge_file: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct PlanOutput {
    pub prompt: String,
    pub steps: Vec<String>,
}

impl CommandOutput for PlanOutput {
    fn to_human(&self) -> String {
        if self.steps.is_empty() {
            return "No steps extracted.".to_string();
        }
        self.steps
            .iter()
            .enumerate()
            .map(|(i, step)| format!("{}. {step}", i + 1))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub async fn execute(args: PlanArgs, ctx: &AppContext, json: bool) -> Result<()> {
    let knowledge = match &args.knowledge_file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read knowledge file {}", path.display()))?,
        None => EGG_RECIPES.to_string(),
    };
    let agent = ActionPlanningAgent::new(ctx.client.clone(), knowledge);

    let spinner = create_spinner_with_message("Planning steps");
    let steps = agent.extract_steps(&args.prompt).await;
    match &steps {
        Ok(steps) => spinner.finish_success(format!("{} step(s)", steps.len())),
        Err(_) => spinner.finish_error("Planning failed"),
    }

    output(
        &PlanOutput {
            prompt: args.prompt,
            steps: steps?,
        },
        json,
    );
    Ok(())
}

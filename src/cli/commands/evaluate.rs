//! `agentflow evaluate`: a knowledge agent checked by an evaluation loop.

use anyhow::Result;
use clap::Args;
use console::style;
use serde::Serialize;
use std::sync::Arc;

use super::knowledge::{DEFAULT_KNOWLEDGE, DEFAULT_PERSONA};
use crate::cli::context::AppContext;
use crate::cli::output::{create_spinner_with_message, output, CommandOutput, ProgressBarExt};
use crate::domain::models::EvaluationResult;
use crate::services::workflow::EVALUATOR_PERSONA;
use crate::services::{EvaluationAgent, KnowledgeAgent};

pub const DEFAULT_CRITERIA: &str = "The answer should be solely the name of a city, not a sentence.";

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Prompt to send
    #[arg(default_value = "What is the capital of France?")]
    pub prompt: String,

    /// Persona of the worker (knowledge) agent
    #[arg(long, default_value = DEFAULT_PERSONA)]
    pub persona: String,

    /// Knowledge of the worker agent
    #[arg(short, long, default_value = DEFAULT_KNOWLEDGE)]
    pub knowledge: String,

    /// What an acceptable answer looks like
    #[arg(long, default_value = DEFAULT_CRITERIA)]
    pub criteria: String,

    /// Iteration bound (default: evaluation.max_iterations from config)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_iterations: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct EvaluateOutput {
    pub prompt: String,
    #[serde(flatten)]
    pub result: EvaluationResult,
}

impl CommandOutput for EvaluateOutput {
    fn to_human(&self) -> String {
        let status = if self.result.is_accepted() {
            style(self.result.diagnostic()).green()
        } else {
            style(self.result.diagnostic()).yellow()
        };
        format!(
            "Final response: {}\n\nEvaluation: {}\n\n{status}",
            self.result.final_response, self.result.evaluation
        )
    }
}

pub async fn execute(args: EvaluateArgs, ctx: &AppContext, json: bool) -> Result<()> {
    let max_iterations = args
        .max_iterations
        .unwrap_or(ctx.config.evaluation.max_iterations);

    let worker = Arc::new(KnowledgeAgent::new(
        ctx.client.clone(),
        args.persona,
        args.knowledge,
    ));
    let agent = EvaluationAgent::new(ctx.client.clone(), worker, EVALUATOR_PERSONA, args.criteria)
        .with_max_iterations(max_iterations);

    let spinner = create_spinner_with_message("Evaluating");
    let result = agent.evaluate(&args.prompt).await;
    match &result {
        Ok(result) => spinner.finish_success(result.diagnostic()),
        Err(_) => spinner.finish_error("Evaluation failed"),
    }

    output(
        &EvaluateOutput {
            prompt: args.prompt,
            result: result?,
        },
        json,
    );
    Ok(())
}

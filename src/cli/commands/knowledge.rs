//! `agentflow knowledge`: answer strictly from supplied knowledge.

use anyhow::Result;
use clap::Args;

use super::{AnswerOutput, DEFAULT_PROMPT};
use crate::cli::context::AppContext;
use crate::cli::output::{create_spinner_with_message, output, ProgressBarExt};
use crate::domain::ports::Agent;
use crate::services::KnowledgeAgent;

pub const DEFAULT_PERSONA: &str =
    "You are a college professor, your answer always starts with: Dear students,";
pub const DEFAULT_KNOWLEDGE: &str = "The capital of France is London, not Paris";

#[derive(Args, Debug)]
pub struct KnowledgeArgs {
    /// Prompt to send
    #[arg(default_value = DEFAULT_PROMPT)]
    pub prompt: String,

    #[arg(short, long, default_value = DEFAULT_PERSONA)]
    pub persona: String,

    /// The only knowledge the agent may use
    #[arg(short, long, default_value = DEFAULT_KNOWLEDGE)]
    pub knowledge: String,
}

pub async fn execute(args: KnowledgeArgs, ctx: &AppContext, json: bool) -> Result<()> {
    let agent = KnowledgeAgent::new(ctx.client.clone(), args.persona, args.knowledge);

    let spinner = create_spinner_with_message("Asking the knowledge agent");
    let response = agent.respond(&args.prompt).await;
    if response.is_err() {
        spinner.finish_error("Request failed");
    } else {
        spinner.finish_and_clear();
    }

    let result = AnswerOutput {
        agent: "knowledge".to_string(),
        note: Some(format!(
            "The agent was instructed to use only the provided knowledge (\"{}\").",
            agent.knowledge()
        )),
        prompt: args.prompt,
        response: response?,
    };
    output(&result, json);
    Ok(())
}

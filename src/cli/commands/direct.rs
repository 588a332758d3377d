//! `agentflow direct`: prompt the model with no system instruction.

use anyhow::Result;
use clap::Args;

use super::{AnswerOutput, DEFAULT_PROMPT};
use crate::cli::context::AppContext;
use crate::cli::output::{create_spinner_with_message, output, ProgressBarExt};
use crate::domain::ports::Agent;
use crate::services::DirectPromptAgent;

#[derive(Args, Debug)]
pub struct DirectArgs {
    /// Prompt to send
    #[arg(default_value = DEFAULT_PROMPT)]
    pub prompt: String,
}

pub async fn execute(args: DirectArgs, ctx: &AppContext, json: bool) -> Result<()> {
    let agent = DirectPromptAgent::new(ctx.client.clone());

    let spinner = create_spinner_with_message("Asking the model");
    let response = agent.respond(&args.prompt).await;
    match &response {
        Ok(_) => spinner.finish_and_clear(),
        Err(_) => spinner.finish_error("Request failed"),
    }

    let result = AnswerOutput {
        agent: "direct".to_string(),
        note: Some(format!(
            "Knowledge source: general knowledge of the model ({}).",
            ctx.config.llm.model
        )),
        prompt: args.prompt,
        response: response?,
    };
    output(&result, json);
    Ok(())
}

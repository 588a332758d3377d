//! `agentflow augmented`: answer in character as a persona.

use anyhow::Result;
use clap::Args;

use super::{AnswerOutput, DEFAULT_PROMPT};
use crate::cli::context::AppContext;
use crate::cli::output::{create_spinner_with_message, output, ProgressBarExt};
use crate::domain::ports::Agent;
use crate::services::AugmentedPromptAgent;

pub const DEFAULT_PERSONA: &str =
    "You are a college professor; your answers always start with: 'Dear students,'";

#[derive(Args, Debug)]
pub struct AugmentedArgs {
    /// Prompt to send
    #[arg(default_value = DEFAULT_PROMPT)]
    pub prompt: String,

    /// Persona used as the system instruction
    #[arg(short, long, default_value = DEFAULT_PERSONA)]
    pub persona: String,
}

pub async fn execute(args: AugmentedArgs, ctx: &AppContext, json: bool) -> Result<()> {
    let agent = AugmentedPromptAgent::new(ctx.client.clone(), args.persona);

    let spinner = create_spinner_with_message("Asking the persona agent");
    let response = agent.respond(&args.prompt).await;
    if response.is_err() {
        spinner.finish_error("Request failed");
    } else {
        spinner.finish_and_clear();
    }

    let result = AnswerOutput {
        agent: "augmented".to_string(),
        note: Some(format!(
            "Knowledge source: general knowledge of the model, answered as: {}",
            agent.persona()
        )),
        prompt: args.prompt,
        response: response?,
    };
    output(&result, json);
    Ok(())
}

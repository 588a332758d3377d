//! `agentflow route`: send prompts to the Texas, Europe or math specialist.

use anyhow::Result;
use clap::Args;
use console::style;
use serde::Serialize;
use std::sync::Arc;

use crate::cli::context::AppContext;
use crate::cli::output::{create_spinner_with_message, output, CommandOutput, TableFormatter};
use crate::domain::models::{AgentDescriptor, RouteDecision};
use crate::domain::ports::CompletionClient;
use crate::services::{KnowledgeAgent, RoutingAgent};

pub const SAMPLE_PROMPTS: [&str; 3] = [
    "Tell me about the history of Rome, Texas",
    "Tell me about the history of Rome, Italy",
    "One story takes 2 days, and there are 20 stories",
];

#[derive(Args, Debug)]
pub struct RouteArgs {
    /// Prompts to route (default: three sample prompts)
    pub prompts: Vec<String>,
}

/// The three specialists, in tie-break order.
pub fn specialist_agents(client: &Arc<dyn CompletionClient>) -> Vec<AgentDescriptor> {
    let professor = "You are a college professor";
    vec![
        AgentDescriptor::new(
            "texas agent",
            "Answer a question about Texas",
            Arc::new(KnowledgeAgent::new(
                client.clone(),
                professor,
                "You know everything about Texas",
            )),
        ),
        AgentDescriptor::new(
            "europe agent",
            "Answer a question about Europe",
            Arc::new(KnowledgeAgent::new(
                client.clone(),
                professor,
                "You know everything about Europe",
            )),
        ),
        AgentDescriptor::new(
            "math agent",
            "When a prompt contains numbers, respond with a math formula",
            Arc::new(KnowledgeAgent::new(
                client.clone(),
                "You are a college math professor",
                "You know everything about math, you take prompts with numbers, extract math \
                 formulas, and show the answer without explanation",
            )),
        ),
    ]
}

#[derive(Debug, Serialize)]
pub struct RoutedAnswer {
    pub prompt: String,
    pub decision: RouteDecision,
    pub response: String,
}

#[derive(Debug, Serialize)]
pub struct RouteOutput {
    pub routes: Vec<RoutedAnswer>,
}

impl CommandOutput for RouteOutput {
    fn to_human(&self) -> String {
        let formatter = TableFormatter::new();
        self.routes
            .iter()
            .map(|route| {
                format!(
                    "{} {}\n{}\n{}",
                    style("Prompt:").bold(),
                    route.prompt,
                    formatter.format_route_scores(&route.decision),
                    route.response
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

pub async fn execute(args: RouteArgs, ctx: &AppContext, json: bool) -> Result<()> {
    let prompts = if args.prompts.is_empty() {
        SAMPLE_PROMPTS.iter().map(ToString::to_string).collect()
    } else {
        args.prompts
    };

    let router = RoutingAgent::new(ctx.embedder.clone(), specialist_agents(&ctx.client));

    let mut routes = Vec::with_capacity(prompts.len());
    for prompt in prompts {
        let spinner = create_spinner_with_message(format!("Routing: {prompt}"));
        let routed = router.route(&prompt).await;
        spinner.finish_and_clear();

        let (decision, response) = routed?;
        routes.push(RoutedAnswer {
            prompt,
            decision,
            response,
        });
    }

    output(&RouteOutput { routes }, json);
    Ok(())
}

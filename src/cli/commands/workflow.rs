//! `agentflow workflow`: plan a product's development and route every step.

use anyhow::Result;
use clap::Args;
use console::style;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::context::AppContext;
use crate::cli::output::{create_spinner_with_message, output, CommandOutput, ProgressBarExt, TableFormatter};
use crate::services::workflow::{load_product_spec, DEFAULT_WORKFLOW_PROMPT};
use crate::services::{WorkflowReport, WorkflowRunner};

#[derive(Args, Debug)]
pub struct WorkflowArgs {
    /// Product spec file (default: workflow.product_spec_path from config)
    #[arg(short, long, value_name = "PATH")]
    pub spec: Option<PathBuf>,

    /// Workflow prompt
    #[arg(short, long, default_value = DEFAULT_WORKFLOW_PROMPT)]
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct WorkflowOutput {
    #[serde(flatten)]
    pub report: WorkflowReport,
    pub final_output: Option<String>,
}

impl From<WorkflowReport> for WorkflowOutput {
    fn from(report: WorkflowReport) -> Self {
        let final_output = report.final_output().map(str::to_string);
        Self {
            report,
            final_output,
        }
    }
}

impl CommandOutput for WorkflowOutput {
    fn to_human(&self) -> String {
        let mut sections = vec![format!(
            "{} {}",
            style("Workflow prompt:").bold(),
            self.report.prompt
        )];

        if self.report.is_empty() {
            sections.push("No steps were extracted from the workflow prompt.".to_string());
            return sections.join("\n\n");
        }

        sections.push(TableFormatter::new().format_steps(&self.report.steps));
        for step in &self.report.steps {
            sections.push(format!(
                "{}\n{}",
                style(format!("--- Step {}: {} ({}) ---", step.index, step.step, step.agent_name)).cyan(),
                step.response
            ));
        }
        if let Some(final_output) = &self.final_output {
            sections.push(format!("{}\n{final_output}", style("Final output of the workflow:").bold()));
        }
        sections.join("\n\n")
    }
}

pub async fn execute(args: WorkflowArgs, ctx: &AppContext, json: bool) -> Result<()> {
    let spec_path = args
        .spec
        .unwrap_or_else(|| PathBuf::from(&ctx.config.workflow.product_spec_path));
    let product_spec = load_product_spec(&spec_path).await?;

    let runner = WorkflowRunner::for_product_spec(
        ctx.client.clone(),
        ctx.embedder.clone(),
        &product_spec,
        ctx.config.evaluation.max_iterations,
    );

    let spinner = create_spinner_with_message("Running workflow");
    let report = runner.run(&args.prompt).await;
    match &report {
        Ok(report) => spinner.finish_success(format!("{} step(s) completed", report.steps.len())),
        Err(_) => spinner.finish_error("Workflow failed"),
    }

    output(&WorkflowOutput::from(report?), json);
    Ok(())
}

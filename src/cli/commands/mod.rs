//! CLI command implementations.

pub mod augmented;
pub mod direct;
pub mod evaluate;
pub mod knowledge;
pub mod plan;
pub mod route;
pub mod workflow;

use console::style;
use serde::Serialize;

use crate::cli::output::CommandOutput;

pub const DEFAULT_PROMPT: &str = "What is the Capital of France?";

/// A single agent answer, with an optional note about where it came from.
#[derive(Debug, Serialize)]
pub struct AnswerOutput {
    pub agent: String,
    pub prompt: String,
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl CommandOutput for AnswerOutput {
    fn to_human(&self) -> String {
        match &self.note {
            Some(note) => format!("{}\n\n{}", self.response, style(note).dim()),
            None => self.response.clone(),
        }
    }
}

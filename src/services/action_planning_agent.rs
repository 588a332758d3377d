//! Action planning: turn a prompt into an ordered list of steps.
//!
//! The model is told to answer with one imperative step per line. Models
//! still number, bullet and embellish their output, so [`parse_steps`] is
//! tolerant: it strips list markers and emphasis and drops the chatter around
//! the list. When any line is a list item, unmarked prose is chatter and is
//! dropped. Output with no recognizable steps yields an empty list.

use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::{debug, info, instrument};

use crate::domain::errors::DomainResult;
use crate::domain::ports::{CompletionClient, CompletionRequest};

/// `1.`, `(1)`, `1:`, `-`, `*`, `•`, `+`, `Step 3:` and friends at the start
/// of a line. Numbered markers need whitespace after them, so `3.5 cups` and
/// `10:30` are content.
static LIST_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:step\s*\d+\s*[:.)\-]?\s*|\(?\d+[.):](?:\s+|$)|[-*•+](?:\s+|$))")
        .expect("Invalid list marker regex")
});

const BOILERPLATE_PREFIXES: &[&str] = &[
    "here are",
    "here is",
    "here's",
    "sure",
    "certainly",
    "of course",
    "these steps",
    "i hope",
    "let me know",
];

/// Asks the model for steps, using only the configured knowledge.
pub struct ActionPlanningAgent {
    client: Arc<dyn CompletionClient>,
    knowledge: String,
}

impl ActionPlanningAgent {
    pub fn new(client: Arc<dyn CompletionClient>, knowledge: impl Into<String>) -> Self {
        Self {
            client,
            knowledge: knowledge.into(),
        }
    }

    pub fn system_prompt(&self) -> String {
        format!(
            "You are an action planning agent. Using your knowledge, you extract from the user \
             prompt the steps requested to complete the action the user is asking for. \
             Return only the steps, one step per line, each step an imperative sentence, with \
             no introduction and no conclusion. Only use the steps in your knowledge. \
             Forget any previous context. This is your knowledge: {}",
            self.knowledge
        )
    }

    /// Ask for steps and parse them; never fails on odd output, only on the call itself.
    #[instrument(skip(self, prompt))]
    pub async fn extract_steps(&self, prompt: &str) -> DomainResult<Vec<String>> {
        let raw = self
            .client
            .complete(CompletionRequest::with_system(self.system_prompt(), prompt))
            .await?;
        debug!(chars = raw.len(), "planner output received");

        let steps = parse_steps(&raw);
        info!(count = steps.len(), "extracted steps");
        Ok(steps)
    }
}

/// Parse free-form model output into clean, ordered steps.
pub fn parse_steps(output: &str) -> Vec<String> {
    let lines: Vec<CleanLine> = output.lines().filter_map(clean_line).collect();
    let any_marked = lines.iter().any(|line| line.marked);
    lines
        .into_iter()
        .filter(|line| line.marked || !any_marked)
        .map(|line| line.step)
        .collect()
}

struct CleanLine {
    step: String,
    /// The line started with a list marker.
    marked: bool,
}

fn clean_line(line: &str) -> Option<CleanLine> {
    let line = line.trim();
    if line.is_empty()
        || line.starts_with('#')
        || line.starts_with("```")
        || line.chars().all(|c| matches!(c, '-' | '*' | '_' | '=' | ' '))
    {
        return None;
    }

    let without_emphasis = line.replace("**", "").replace("__", "");
    let without_emphasis = without_emphasis.trim();
    let marked = LIST_MARKER.is_match(without_emphasis);
    let without_marker = LIST_MARKER.replace(without_emphasis, "");
    let step = without_marker
        .trim()
        .trim_matches(|c: char| c == '*' || c == '_' || c == '`')
        .trim();

    if step.is_empty() || step.ends_with(':') || is_boilerplate(step) {
        return None;
    }

    Some(CleanLine {
        step: step.to_string(),
        marked,
    })
}

fn is_boilerplate(step: &str) -> bool {
    let lowered = step.to_lowercase();
    BOILERPLATE_PREFIXES
        .iter()
        .any(|prefix| lowered.starts_with(prefix))
}

//! Table output formatting for CLI commands
//!
//! Renders routing scores and workflow step summaries with comfy-table.
//! Colors are dropped when `NO_COLOR` is set or the terminal is dumb.

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use std::env;

use super::truncate;
use crate::domain::models::RouteDecision;
use crate::services::StepOutcome;

/// Table formatter for CLI output
pub struct TableFormatter {
    use_colors: bool,
    /// Maximum width for tables (None = auto)
    max_width: Option<u16>,
}

impl TableFormatter {
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
            max_width: None,
        }
    }

    pub fn with_config(use_colors: bool, max_width: Option<u16>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    /// One row per registered agent; the chosen one is marked.
    pub fn format_route_scores(&self, decision: &RouteDecision) -> String {
        let mut table = self.create_base_table();
        table.set_header(vec![
            Cell::new("").add_attribute(Attribute::Bold),
            Cell::new("Agent").add_attribute(Attribute::Bold),
            Cell::new("Score").add_attribute(Attribute::Bold),
        ]);

        for (i, (name, score)) in decision.scores.iter().enumerate() {
            let chosen = i == decision.index;
            let marker = if chosen { "→" } else { "" };
            let mut name_cell = Cell::new(name);
            if chosen && self.use_colors {
                name_cell = name_cell.fg(Color::Green).add_attribute(Attribute::Bold);
            }
            table.add_row(vec![
                Cell::new(marker),
                name_cell,
                Cell::new(format!("{score:.4}")),
            ]);
        }

        table.to_string()
    }

    /// Step number, step text and the job function that handled it.
    pub fn format_steps(&self, steps: &[StepOutcome]) -> String {
        let mut table = self.create_base_table();
        table.set_header(vec![
            Cell::new("#").add_attribute(Attribute::Bold),
            Cell::new("Step").add_attribute(Attribute::Bold),
            Cell::new("Agent").add_attribute(Attribute::Bold),
        ]);

        for step in steps {
            let agent_cell = if self.use_colors {
                Cell::new(&step.agent_name).fg(Color::Cyan)
            } else {
                Cell::new(&step.agent_name)
            };
            table.add_row(vec![
                Cell::new(step.index),
                Cell::new(truncate(&step.step, 60)),
                agent_cell,
            ]);
        }

        table.to_string()
    }

    fn create_base_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        if let Some(width) = self.max_width {
            table.set_width(width);
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn supports_color() -> bool {
    if env::var("NO_COLOR").is_ok() {
        return false;
    }
    !matches!(env::var("TERM").as_deref(), Ok("dumb"))
}

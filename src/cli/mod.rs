//! Command-line interface.

pub mod commands;
pub mod context;
pub mod output;
pub mod types;

pub use context::AppContext;
pub use types::{Cli, Commands};

use console::style;

/// Print an error (human or JSON) to stderr and exit with status 1.
pub fn handle_error(err: anyhow::Error, json: bool) -> ! {
    if json {
        let payload = serde_json::json!({
            "error": err.to_string(),
            "causes": err.chain().skip(1).map(ToString::to_string).collect::<Vec<_>>(),
        });
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&payload).unwrap_or_default()
        );
    } else {
        eprintln!("{} {err:#}", style("Error:").red().bold());
    }
    std::process::exit(1);
}

/// Run the parsed command against a prepared context.
pub async fn dispatch(command: Commands, ctx: &AppContext, json: bool) -> anyhow::Result<()> {
    match command {
        Commands::Direct(args) => commands::direct::execute(args, ctx, json).await,
        Commands::Augmented(args) => commands::augmented::execute(args, ctx, json).await,
        Commands::Knowledge(args) => commands::knowledge::execute(args, ctx, json).await,
        Commands::Plan(args) => commands::plan::execute(args, ctx, json).await,
        Commands::Evaluate(args) => commands::evaluate::execute(args, ctx, json).await,
        Commands::Route(args) => commands::route::execute(args, ctx, json).await,
        Commands::Workflow(args) => commands::workflow::execute(args, ctx, json).await,
    }
}

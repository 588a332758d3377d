//! agentflow CLI entry point.

use anyhow::Result;
use clap::Parser;

use agentflow::cli::{dispatch, handle_error, AppContext, Cli};
use agentflow::infrastructure::config::ConfigLoader;
use agentflow::infrastructure::credentials::{load_dotenv, load_dotenv_from};
use agentflow::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = run(cli).await {
        handle_error(err, json);
    }
}

async fn run(cli: Cli) -> Result<()> {
    load_dotenv();
    load_dotenv_from(".agentflow/.env");

    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    let _logger = LoggerImpl::init(&LogConfig::from(&config.logging))?;
    tracing::debug!(model = %config.llm.model, "configuration loaded");

    let ctx = AppContext::from_config(config)?;
    dispatch(cli.command, &ctx, cli.json).await
}

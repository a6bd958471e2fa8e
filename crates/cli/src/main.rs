mod commands;

use anyhow::Context;
use clap::Parser;

use commands::{Cli, Command, run_candidates, run_project};
use posline_config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_env().context("loading configuration")?;
    posline_observability::init_with(&config.logging);
    config.report_defaults();

    let output = match cli.command {
        Command::Project { order, base } => run_project(&config, &order, base.as_deref())?,
        Command::Candidates { config_id } => run_candidates(&config, &config_id).await?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

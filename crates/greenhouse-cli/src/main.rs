mod cli;
mod commands;
mod config;
mod format;

use std::io;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::{DashboardContext, cmd_config, cmd_snapshot, cmd_watch};
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle completions command early (before tracing init)
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "greenhouse", &mut io::stdout());
        return Ok(());
    }

    // Logs go to stderr so frames on stdout stay machine-readable
    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config_path = cli.config.clone().unwrap_or_else(Config::path);
    let config = Config::load_from(&config_path);
    let no_color = cli.no_color || config.no_color;

    match cli.command {
        Commands::Watch { feed, view, ticks } => {
            let ctx = DashboardContext::resolve(&feed, &view, &config, no_color, cli.quiet);
            cmd_watch(&ctx, ticks).await?;
        }
        Commands::Snapshot { feed, view, ticks } => {
            let ctx = DashboardContext::resolve(&feed, &view, &config, no_color, cli.quiet);
            cmd_snapshot(&ctx, ticks)?;
        }
        Commands::Config { action } => {
            cmd_config(action, &config_path, &config)?;
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}

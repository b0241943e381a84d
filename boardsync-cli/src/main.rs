//! Boardsync CLI - mark closed issues as Done on a GitHub project board
//!
//! With no arguments every closed issue carrying the configured label is
//! synchronized; otherwise only the given issue numbers are.

use boardsync_core::{Config, Credentials};
use boardsync_github::{GitHubClient, IssueSelection, StatusSync};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Set the project Status field to Done for closed issues
#[derive(Parser, Debug)]
#[command(name = "boardsync")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Issue numbers to update (default: all closed issues with the done label)
    #[arg(value_name = "ISSUE")]
    issues: Vec<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the report, logs go to stderr
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    let config = Config::load_with_overrides()?;
    let credentials = Credentials::from_env(&config.github.token_env)?;

    tracing::debug!(
        owner = %config.project.owner,
        repo = %config.project.repo,
        project = config.project.number,
        "Configuration loaded"
    );

    let client = GitHubClient::from_config(&config, &credentials)?;
    let selection = IssueSelection::from_numbers(cli.issues);

    let report = StatusSync::new(&client)
        .run(&selection, &mut std::io::stdout())
        .await?;

    tracing::info!(
        updated = report.updated(),
        skipped = report.skipped(),
        "Sync finished"
    );

    Ok(())
}

//! Command-line interface.
//!
//! The binary does exactly one thing per invocation - a single sweep - so the
//! surface is a couple of overrides rather than subcommands.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "issue-herald",
    version,
    about = "Polls GitHub for newly raised issues across an organization and relays summaries to Slack"
)]
pub struct Cli {
    /// Path to a YAML config file (defaults to herald.yaml in the working directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the SQLite database path from the config
    #[arg(long)]
    pub database: Option<String>,
}

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Terminal messaging client: run the TUI, or manage the saved session.
#[derive(Debug, Parser)]
#[command(name = "pchat", version, about)]
pub struct Cli {
    /// Config file to read instead of ./config.toml
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Defaults to `run` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Default, Subcommand)]
pub enum Command {
    /// Start the TUI shell
    #[default]
    Run,
    /// Remove the persisted session
    Logout,
}

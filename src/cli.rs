use crate::list::EmptyListPolicy;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "coral-list")]
#[command(about = "An interactive shell over an in-memory Redis-style list store")]
#[command(long_about = "Coral List reads list commands (RPUSH, LPOP, LRANGE, LREM, LTRIM, ...) one per line and prints each reply")]
#[command(version)]
pub struct Cli {
    /// Read commands from this file instead of stdin
    #[arg(short, long)]
    pub script: Option<PathBuf>,

    /// What to do with keys whose list becomes empty
    #[arg(short, long)]
    pub empty_lists: Option<EmptyLists>,

    /// Disable OpenTelemetry metrics
    #[arg(long)]
    pub no_metrics: bool,

    /// Configuration file path (JSON format)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum EmptyLists {
    /// Keep drained keys as empty lists (default)
    Retain,
    /// Delete a key as soon as its list is drained
    Reclaim,
}

impl EmptyLists {
    pub fn policy(&self) -> EmptyListPolicy {
        match self {
            EmptyLists::Retain => EmptyListPolicy::Retain,
            EmptyLists::Reclaim => EmptyListPolicy::Reclaim,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Log level implied by the verbosity flags.
    pub fn log_level(&self) -> tracing::Level {
        if self.debug {
            tracing::Level::TRACE
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

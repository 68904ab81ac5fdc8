//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::OutputFormat;

/// calrecur - expand recurring calendar events into concrete occurrences
#[derive(Debug, Parser)]
#[command(name = "calrecur")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "CALRECUR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the occurrences of an event inside a window
    Expand(ExpandArgs),

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Arguments of `calrecur expand`.
#[derive(Debug, Clone, clap::Args)]
pub struct ExpandArgs {
    /// Event JSON document (`startAt`, `endAt`, optional `recurrence`), or `-` for stdin
    #[arg(long, short)]
    pub event: PathBuf,

    /// Window start, RFC 3339 (inclusive)
    #[arg(long)]
    pub from: String,

    /// Window end, RFC 3339 (inclusive)
    #[arg(long)]
    pub to: String,

    /// Print the JSON response body instead of one instant per line
    #[arg(long)]
    pub json: bool,

    /// Override the configured safety ceiling
    #[arg(long)]
    pub max_occurrences: Option<usize>,
}

impl ExpandArgs {
    /// Returns the output format, letting `--json` override the config.
    pub fn output_format(&self, configured: OutputFormat) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            configured
        }
    }

    /// Returns `true` if the event is read from stdin.
    pub fn reads_stdin(&self) -> bool {
        self.event.as_os_str() == "-"
    }
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}

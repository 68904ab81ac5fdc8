//! calrecur CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use calrecur_client::cli::{Cli, Command, ConfigAction};
use calrecur_client::commands;
use calrecur_client::config::ClientConfig;
use calrecur_client::error::ClientResult;
use calrecur_core::{TracingConfig, init_tracing};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> ClientResult<()> {
    let config_path = ClientConfig::resolve_path(cli.config.as_deref());
    let config = match cli.config {
        Some(ref path) => ClientConfig::load_from(path)?,
        None => ClientConfig::load()?,
    };

    let tracing_config = if cli.debug || config.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::default()
    };
    init_tracing(tracing_config)?;

    match cli.command {
        Command::Expand(args) => commands::expand::run(&args, &config),
        Command::Config { action } => match action {
            ConfigAction::Dump => commands::config::dump(&config, &config_path),
            ConfigAction::Validate => commands::config::validate(&config),
            ConfigAction::Path => commands::config::path(&config_path),
        },
    }
}

//! suitehook CLI: run the built-in suites, list them, and inspect configuration.

mod cli;
mod commands;
mod error;
mod logging;
mod output;
mod samples;

use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use suitehook_core::config::GeneralConfig;

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    // `config validate` reports a broken file itself, so loading is deferred
    let loaded = commands::config::load_effective(&cli.config).await;

    let mut general: GeneralConfig = loaded
        .as_ref()
        .map(|config| config.general.clone())
        .unwrap_or_default();
    if let Some(level) = &cli.log_level {
        general.log_level = level.clone();
    }
    logging::init_tracing(&general).map_err(|e| CliError::Config(e.to_string()))?;
    suitehook_core::metrics::describe_all();

    debug!(
        path = %cli.config.display(),
        exists = cli.config.exists(),
        "configuration source"
    );

    let writer = OutputWriter::new(cli.output);
    match cli.command {
        Commands::Run(args) => {
            let mut config = loaded?;
            config.general = general;
            commands::run::execute(args, config, &writer).await
        }
        Commands::List => commands::list::execute(&writer),
        Commands::Config(args) => commands::config::execute(args, &cli.config, &writer).await,
    }
}

//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use suitehook_core::CaseOrder;

/// suitehook -- test suites with explicit setup/teardown and property injection.
///
/// Use `suitehook <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "suitehook", version, about, long_about = None)]
pub struct Cli {
    /// Path to the suitehook.toml configuration file.
    #[arg(short, long, default_value = "suitehook.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the built-in suites.
    Run(RunArgs),

    /// List registered suites and their cases.
    List,

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- run ----

/// Run suites, all of them when no name is given.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Suite names to run (default: every registered suite).
    pub suites: Vec<String>,

    /// Case execution order.
    #[arg(long)]
    pub order: Option<OrderArg>,

    /// Seed for random order (implies --order random).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Only run cases whose name contains this text.
    #[arg(long)]
    pub filter: Option<String>,

    /// Run suites on separate threads.
    #[arg(long)]
    pub parallel: bool,
}

/// Case order accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    Declared,
    Reversed,
    Random,
}

impl From<OrderArg> for CaseOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Declared => CaseOrder::Declared,
            OrderArg::Reversed => CaseOrder::Reversed,
            OrderArg::Random => CaseOrder::Random,
        }
    }
}

// ---- config ----

/// Manage suitehook configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, runner, properties).
        #[arg(long)]
        section: Option<String>,
    },
}

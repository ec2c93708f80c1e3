//! # lran CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lran_cli::invoke::{run_invoke, InvokeArgs};
use lran_cli::roles::run_roles;
use lran_workflow::NetworkConfig;

/// Land records network client.
///
/// Invokes contract functions against a ledger kept in a JSON snapshot file.
#[derive(Parser, Debug)]
#[command(name = "lran", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the network configuration YAML.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to the ledger snapshot file. Created on first write.
    #[arg(long, global = true, default_value = "lran-ledger.json")]
    ledger: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Invoke a contract function.
    Invoke(InvokeArgs),

    /// Print the role table in effect.
    Roles,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    if std::env::var("LRAN_LOG_JSON").is_ok_and(|v| v == "1") {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    let config = match NetworkConfig::load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::from(2);
        }
    };

    let result = match &cli.command {
        Commands::Invoke(args) => run_invoke(args, &cli.ledger, &config),
        Commands::Roles => run_roles(&config.roles),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

//! # certverify CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use certverify_cli::list::{run_list, ListArgs};
use certverify_cli::lookup::{run_lookup, LookupArgs};
use certverify_cli::seed::{run_seed, SeedArgs};

/// Certificate verification operator tool.
///
/// Looks up certificates through the verification service, exports PDF
/// reports, and seeds the record store.
#[derive(Parser, Debug)]
#[command(name = "certverify", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Verify one certificate number.
    Lookup(LookupArgs),

    /// List every verification record.
    List(ListArgs),

    /// Insert records from a JSON file into the record store.
    Seed(SeedArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match &cli.command {
        Commands::Lookup(args) => run_lookup(args).await,
        Commands::List(args) => run_list(args).await,
        Commands::Seed(args) => run_seed(args).await,
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

//! # gjv CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gjv_cli::check::{run_check, CheckArgs};
use gjv_cli::schemas::{run_schemas, SchemasArgs};
use gjv_cli::{resolve_validator, EXIT_ERROR};

/// GeoJSON validator.
///
/// Validates documents against the GeoJSON schema and, for rejected
/// documents, reports the smallest Feature, geometry, or collection that
/// is invalid on its own.
#[derive(Parser, Debug)]
#[command(name = "gjv", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit log lines as JSON objects.
    #[arg(long, global = true)]
    log_json: bool,

    /// Load the schema bundle from this directory instead of the embedded copy.
    #[arg(long, global = true)]
    schema_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate GeoJSON files and locate the smallest invalid unit.
    Check(CheckArgs),

    /// List or print the schema documents in use.
    Schemas(SchemasArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when set.
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "gjv starting");

    let result = resolve_validator(cli.schema_dir.as_deref()).and_then(|validator| {
        tracing::debug!(
            source = ?validator.source(),
            schemas = validator.schema_count(),
            "schema bundle ready"
        );
        match cli.command {
            Commands::Check(args) => run_check(&args, &validator),
            Commands::Schemas(args) => run_schemas(&args, &validator),
        }
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

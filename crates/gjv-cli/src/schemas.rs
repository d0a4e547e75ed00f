//! # Schemas Subcommand
//!
//! Lists the schema documents the validator was built from, or prints one.

use std::io::Write;

use anyhow::{bail, Result};
use clap::Args;
use gjv_schema::{schema_uri, SchemaValidator};

use crate::EXIT_VALID;

/// Arguments for the `gjv schemas` subcommand.
#[derive(Args, Debug)]
pub struct SchemasArgs {
    /// Print one schema, by file name (`geometry.json`) or full URI.
    #[arg(long, value_name = "NAME")]
    pub print: Option<String>,
}

/// Execute the schemas subcommand.
pub fn run_schemas(args: &SchemasArgs, validator: &SchemaValidator) -> Result<u8> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match &args.print {
        Some(name) => print_schema(validator, name, &mut out)?,
        None => list_schemas(validator, &mut out)?,
    }
    Ok(EXIT_VALID)
}

/// Write one schema URI per line, sorted.
pub fn list_schemas(validator: &SchemaValidator, out: &mut impl Write) -> Result<()> {
    for uri in validator.schema_uris() {
        writeln!(out, "{uri}")?;
    }
    Ok(())
}

/// Pretty-print the schema named `name`.
///
/// A bare file name is resolved against the GeoJSON schema URI prefix.
pub fn print_schema(validator: &SchemaValidator, name: &str, out: &mut impl Write) -> Result<()> {
    let uri = if name.contains("://") {
        name.to_string()
    } else {
        schema_uri(name)
    };
    let Some(schema) = validator.get_schema(&uri) else {
        bail!("unknown schema: {name}");
    };
    serde_json::to_writer_pretty(&mut *out, schema)?;
    writeln!(out)?;
    Ok(())
}

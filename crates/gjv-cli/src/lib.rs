#![deny(missing_docs)]

//! # gjv-cli — GeoJSON Validation Command-Line Interface
//!
//! Provides the `gjv` binary. Argument parsing lives here; validation and
//! descent are delegated to `gjv-schema` and `gjv-partial`.
//!
//! ## Subcommands
//!
//! - `gjv check` — validate files or directories of GeoJSON and report the
//!   smallest invalid unit of each rejected document.
//! - `gjv schemas` — list or print the schema documents in use.
//!
//! ```bash
//! gjv check data/parcels.geojson
//! gjv check --all --format json data/
//! gjv --schema-dir ./schemas schemas --print geometry.json
//! ```
//!
//! ## Exit Codes
//!
//! `0` every document valid, `1` at least one invalid document, `2` an
//! operational error (unreadable file, malformed JSON, bad schema bundle).

pub mod check;
pub mod schemas;

use std::ops::Deref;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use gjv_schema::SchemaValidator;

/// Exit code: every document valid.
pub const EXIT_VALID: u8 = 0;
/// Exit code: at least one document invalid.
pub const EXIT_INVALID: u8 = 1;
/// Exit code: operational error.
pub const EXIT_ERROR: u8 = 2;

/// A schema validator that is either the process-wide bundled instance or
/// one loaded from a directory for this run.
#[derive(Debug)]
pub enum SchemaHandle {
    /// The embedded bundle, built once per process.
    Bundled(&'static SchemaValidator),
    /// A bundle loaded from disk.
    Loaded(SchemaValidator),
}

impl Deref for SchemaHandle {
    type Target = SchemaValidator;

    fn deref(&self) -> &SchemaValidator {
        match self {
            Self::Bundled(v) => v,
            Self::Loaded(v) => v,
        }
    }
}

/// Build the validator selected by `--schema-dir`, or the bundled one.
pub fn resolve_validator(schema_dir: Option<&Path>) -> Result<SchemaHandle> {
    match schema_dir {
        Some(dir) => SchemaValidator::from_dir(dir)
            .map(SchemaHandle::Loaded)
            .with_context(|| format!("failed to load schema bundle from {}", dir.display())),
        None => gjv_schema::bundled()
            .map(SchemaHandle::Bundled)
            .map_err(|e| anyhow!("failed to build bundled GeoJSON schema: {e}")),
    }
}

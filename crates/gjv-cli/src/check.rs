//! # Check Subcommand
//!
//! Validates GeoJSON files against the schema bundle. For each rejected
//! document the partial validator descends to the smallest sub-document
//! that is invalid on its own, and that unit is reported with its JSON
//! Pointer, kind, and violations.
//!
//! Paths may be files or directories. Directories are walked recursively
//! for `.geojson`, `.json`, `.yaml`, and `.yml` files, in sorted order.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use gjv_core::GeoJsonKind;
use gjv_partial::{InvalidUnit, PartialValidator};
use gjv_schema::{load_document, SchemaValidator, Violation};
use serde::Serialize;
use serde_json::Value;

use crate::{EXIT_ERROR, EXIT_INVALID, EXIT_VALID};

/// File extensions picked up when walking a directory.
const GEOJSON_EXTENSIONS: &[&str] = &["geojson", "json", "yaml", "yml"];

/// Arguments for the `gjv check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Files or directories to check.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Report every invalid unit instead of only the first.
    #[arg(long)]
    pub all: bool,

    /// Include the offending node in the report.
    #[arg(long)]
    pub show_node: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Report rendering.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One line per file, indented unit lines below rejected files.
    Text,
    /// A single JSON array of file reports.
    Json,
}

/// Rendering switches shared by both formats.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// Include the offending node.
    pub show_node: bool,
}

/// The outcome of checking one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// The file that was checked.
    pub path: PathBuf,
    /// What happened.
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

/// Per-file result.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// The whole document validates.
    Valid,
    /// The document is rejected.
    Invalid {
        /// The located invalid units.
        units: Vec<UnitSummary>,
    },
    /// The file could not be read or parsed.
    Error {
        /// Why loading failed.
        reason: String,
    },
}

/// An owned summary of an [`InvalidUnit`], detached from the source document.
#[derive(Debug, Clone, Serialize)]
pub struct UnitSummary {
    /// JSON Pointer to the unit.
    pub pointer: String,
    /// The unit's declared kind.
    pub kind: GeoJsonKind,
    /// Why the descent stopped at this unit.
    pub reason: String,
    /// Violations of the unit validated on its own.
    pub violations: Vec<Violation>,
    /// The unit itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<Value>,
}

impl UnitSummary {
    /// Summarize `unit`, copying the node only when `show_node` is set.
    pub fn from_unit(unit: &InvalidUnit<'_>, show_node: bool) -> Self {
        Self {
            pointer: unit.path.to_pointer(),
            kind: unit.kind,
            reason: unit.reason.to_string(),
            violations: unit.error.violations().to_vec(),
            node: show_node.then(|| unit.node.clone()),
        }
    }

    fn pointer_label(&self) -> &str {
        if self.pointer.is_empty() {
            "(root)"
        } else {
            &self.pointer
        }
    }
}

impl FileOutcome {
    fn exit_code(&self) -> u8 {
        match self {
            Self::Valid => EXIT_VALID,
            Self::Invalid { .. } => EXIT_INVALID,
            Self::Error { .. } => EXIT_ERROR,
        }
    }
}

/// Execute the check subcommand.
pub fn run_check(args: &CheckArgs, validator: &SchemaValidator) -> Result<u8> {
    let files = collect_files(&args.paths)?;
    if files.is_empty() {
        tracing::warn!("no GeoJSON files found under the given paths");
    }

    let opts = ReportOptions {
        show_node: args.show_node,
    };
    let reports = check_files(&files, validator, args.all, opts);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Text => render_text(&reports, opts, &mut out)?,
        OutputFormat::Json => render_json(&reports, &mut out)?,
    }

    Ok(exit_code(&reports))
}

/// Check each file in order.
pub fn check_files(
    files: &[PathBuf],
    validator: &SchemaValidator,
    all: bool,
    opts: ReportOptions,
) -> Vec<FileReport> {
    let partial = PartialValidator::new(validator);
    files
        .iter()
        .map(|path| FileReport {
            path: path.clone(),
            outcome: check_file(path, &partial, all, opts),
        })
        .collect()
}

fn check_file(
    path: &Path,
    partial: &PartialValidator<'_>,
    all: bool,
    opts: ReportOptions,
) -> FileOutcome {
    let document = match load_document(path) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not load document");
            return FileOutcome::Error {
                reason: e.to_string(),
            };
        }
    };

    let units: Vec<InvalidUnit<'_>> = if all {
        partial.find_all_invalid_units(&document)
    } else {
        partial.locate_invalid_unit(&document).into_iter().collect()
    };

    if units.is_empty() {
        tracing::info!(path = %path.display(), "valid");
        return FileOutcome::Valid;
    }

    tracing::info!(path = %path.display(), units = units.len(), "invalid");
    FileOutcome::Invalid {
        units: units
            .iter()
            .map(|u| UnitSummary::from_unit(u, opts.show_node))
            .collect(),
    }
}

/// The process exit code for a batch: the worst outcome wins.
pub fn exit_code(reports: &[FileReport]) -> u8 {
    reports
        .iter()
        .map(|r| r.outcome.exit_code())
        .max()
        .unwrap_or(EXIT_VALID)
}

/// Render reports as human-readable lines.
pub fn render_text(
    reports: &[FileReport],
    opts: ReportOptions,
    out: &mut impl Write,
) -> Result<()> {
    for report in reports {
        let path = report.path.display();
        match &report.outcome {
            FileOutcome::Valid => writeln!(out, "OK: {path}")?,
            FileOutcome::Error { reason } => writeln!(out, "ERROR: {path}: {reason}")?,
            FileOutcome::Invalid { units } => {
                writeln!(out, "INVALID: {path}")?;
                for unit in units {
                    writeln!(
                        out,
                        "  {} [{}]: {}",
                        unit.pointer_label(),
                        unit.kind,
                        unit.reason
                    )?;
                    for violation in &unit.violations {
                        writeln!(out, "    - {violation}")?;
                    }
                    if opts.show_node {
                        if let Some(node) = &unit.node {
                            writeln!(out, "    node: {node}")?;
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

/// Render reports as a pretty-printed JSON array.
pub fn render_json(reports: &[FileReport], out: &mut impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, reports).context("failed to serialize report")?;
    writeln!(out)?;
    Ok(())
}

/// Expand directories into the GeoJSON files beneath them.
///
/// Explicit file arguments are kept whatever their extension.
pub fn collect_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            walk_dir(path, &mut files)
                .with_context(|| format!("failed to read directory {}", path.display()))?;
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

fn walk_dir(dir: &Path, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            walk_dir(&path, files)?;
        } else if has_geojson_extension(&path) {
            files.push(path);
        }
    }
    Ok(())
}

fn has_geojson_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| GEOJSON_EXTENSIONS.contains(&e))
}

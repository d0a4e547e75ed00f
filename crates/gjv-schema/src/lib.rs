#![deny(missing_docs)]

//! # gjv-schema — GeoJSON Schema Validation
//!
//! Checks single documents for conformance with the GeoJSON JSON Schema
//! (Draft 4). This crate is the authority on "is this value GeoJSON"; it has
//! no notion of descending into sub-documents.
//!
//! ## Schema Bundle (`bundle`)
//!
//! The four interlinked schema files (`geojson.json`, `crs.json`,
//! `bbox.json`, `geometry.json`) ship in `schemas/` and are embedded at
//! compile time. Their `$ref` URIs point at `http://json-schema.org/geojson/`,
//! which is not a live endpoint: every reference is answered from the
//! bundle, never from the network.
//!
//! ## Runtime Validation (`validate`)
//!
//! - [`SchemaValidator`] — compiles the root schema once and validates any
//!   number of documents against it. `Send + Sync`.
//! - [`bundled()`] — the process-wide validator built from the embedded
//!   bundle on first use.
//! - [`DocumentValidator`] — the one-operation contract other crates depend
//!   on instead of the engine.
//!
//! ## Document Loading (`document`)
//!
//! [`load_document`] reads JSON or YAML documents from disk.

pub mod bundle;
pub mod document;
pub mod validate;

pub use bundle::{schema_uri, BundledSchema, GEOJSON_SCHEMA_BUNDLE, ROOT_SCHEMA_FILE, SCHEMA_URI_PREFIX};
pub use document::load_document;
pub use validate::{
    bundled, DocumentValidator, LoadError, SchemaSource, SchemaValidationError, SchemaValidator,
    Violation,
};

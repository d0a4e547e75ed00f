#![deny(missing_docs)]

//! # gjv-core — Foundational Types for GeoJSON Validation
//!
//! Defines the structural vocabulary shared by the schema layer and the
//! partial validator. Nothing in this crate performs schema validation; it
//! only knows how a GeoJSON document is shaped.
//!
//! ## Key Types
//!
//! - [`GeoJsonKind`] — closed classification of the `"type"` tag. Seven
//!   geometry kinds, `Feature`, `FeatureCollection`, plus an `Unrecognized`
//!   fallback. Exhaustive `match` everywhere.
//! - [`ChildStep`] / [`NodePath`] — the route from a root document to one of
//!   its structural descendants, rendered as a JSON Pointer.
//! - [`StructuralLookupError`] — a container that declares its kind but lacks
//!   the key (or the sequence) its kind requires.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `gjv-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod kind;
pub mod path;

pub use error::StructuralLookupError;
pub use kind::{GeoJsonKind, GEOJSON_KIND_COUNT};
pub use path::{ChildStep, NodePath};

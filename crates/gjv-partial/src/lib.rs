#![deny(missing_docs)]

//! # gjv-partial — Partial GeoJSON Validation
//!
//! Answers two questions about a GeoJSON document: is it valid, and if not,
//! which Feature or geometry inside it is to blame.
//!
//! ## Descent
//!
//! A rejected document is classified by its `"type"` and the search recurses
//! into its structural children (`"features"`, `"geometries"`, `"geometry"`)
//! in declaration order, validating each against the full GeoJSON schema.
//! The first child sub-tree that fails yields the unit; when no child fails,
//! or the node cannot be decomposed, the node itself is the unit.
//!
//! - [`PartialValidator::find_invalid_unit`] — the first, deepest invalid node.
//! - [`PartialValidator::locate_invalid_unit`] — the same, with its JSON
//!   Pointer, kind, violations, and the reason the descent stopped there.
//! - [`PartialValidator::find_all_invalid_units`] — every leaf-level invalid
//!   unit, flat and in depth-first order.
//!
//! ## Crate Policy
//!
//! - Documents are borrowed, never mutated or cloned; units are sub-tree
//!   references into the caller's document.
//! - Depends on the schema engine only through [`DocumentValidator`].
//!
//! [`DocumentValidator`]: gjv_schema::DocumentValidator

pub mod descent;
pub mod unit;

pub use descent::{
    find_all_invalid_units, find_invalid_unit, geojson_is_valid, geojson_is_valid_strict,
    locate_invalid_unit, PartialValidator,
};
pub use unit::{InvalidUnit, TerminalReason};

//! # Partial Validation Descent
//!
//! Validate-then-descend over the structural tree of a GeoJSON document.
//!
//! Each visited node is in one of two states. `Valid` ends the visit with
//! nothing to report. `Invalid` either descends into the node's children,
//! in declaration order, or terminates by reporting the node itself. The
//! single-result search never backtracks: the first child sub-tree that
//! yields a unit decides the answer.
//!
//! The node itself is reported when:
//!
//! - its kind is a leaf geometry or unrecognized,
//! - it is a container and every child validates on its own (the failure
//!   spans siblings or lives in the container's own members),
//! - it is a container missing its child key, or holding a non-array where
//!   an array is required.

use gjv_core::{GeoJsonKind, NodePath};
use gjv_schema::{bundled, DocumentValidator, LoadError, SchemaValidationError, SchemaValidator};
use serde_json::Value;

use crate::unit::{InvalidUnit, TerminalReason};

/// Partial validator over any [`DocumentValidator`].
#[derive(Debug)]
pub struct PartialValidator<'v, V: ?Sized = SchemaValidator> {
    validator: &'v V,
}

impl<V: ?Sized> Clone for PartialValidator<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V: ?Sized> Copy for PartialValidator<'_, V> {}

impl PartialValidator<'static, SchemaValidator> {
    /// A partial validator over the process-wide bundled schema validator.
    ///
    /// # Errors
    ///
    /// The memoized [`LoadError`] if the bundled schema failed to build.
    pub fn bundled() -> Result<Self, &'static LoadError> {
        bundled().map(Self::new)
    }
}

impl<'v, V: DocumentValidator + ?Sized> PartialValidator<'v, V> {
    /// Wrap a schema validator.
    pub fn new(validator: &'v V) -> Self {
        Self { validator }
    }

    /// The underlying schema validator.
    pub fn validator(&self) -> &'v V {
        self.validator
    }

    /// Whether `document` conforms to the schema.
    pub fn is_valid(&self, document: &Value) -> bool {
        self.validator.validate(document).is_ok()
    }

    /// Like [`is_valid`](Self::is_valid), but returns the violations instead
    /// of `false`.
    ///
    /// # Errors
    ///
    /// The [`SchemaValidationError`] for `document`.
    pub fn is_valid_strict(&self, document: &Value) -> Result<bool, SchemaValidationError> {
        self.validator.validate(document).map(|()| true)
    }

    /// The first, deepest invalid node of `document`, or `None` if it is valid.
    pub fn find_invalid_unit<'a>(&self, document: &'a Value) -> Option<&'a Value> {
        self.locate_invalid_unit(document).map(|unit| unit.node)
    }

    /// Like [`find_invalid_unit`](Self::find_invalid_unit), with diagnostics.
    pub fn locate_invalid_unit<'a>(&self, document: &'a Value) -> Option<InvalidUnit<'a>> {
        self.descend(document, NodePath::root())
    }

    /// Every leaf-level invalid unit of `document`, in depth-first order.
    ///
    /// Empty iff `document` is valid. The first element is always the unit
    /// [`locate_invalid_unit`](Self::locate_invalid_unit) returns.
    pub fn find_all_invalid_units<'a>(&self, document: &'a Value) -> Vec<InvalidUnit<'a>> {
        let mut units = Vec::new();
        self.collect(document, NodePath::root(), &mut units);
        units
    }

    fn descend<'a>(&self, node: &'a Value, path: NodePath) -> Option<InvalidUnit<'a>> {
        let error = self.validator.validate(node).err()?;
        let kind = GeoJsonKind::classify(node);

        let reason = match kind.children(node) {
            Ok(children) => {
                for (step, child) in children {
                    if let Some(unit) = self.descend(child, path.child(step)) {
                        return Some(unit);
                    }
                }
                TerminalReason::after_children(kind)
            }
            Err(lookup) => TerminalReason::StructuralLookup(lookup),
        };

        Some(InvalidUnit::report(path, kind, node, error, reason))
    }

    fn collect<'a>(&self, node: &'a Value, path: NodePath, units: &mut Vec<InvalidUnit<'a>>) {
        let Err(error) = self.validator.validate(node) else {
            return;
        };
        let kind = GeoJsonKind::classify(node);

        let reason = match kind.children(node) {
            Ok(children) => {
                let before = units.len();
                for (step, child) in children {
                    self.collect(child, path.child(step), units);
                }
                if units.len() > before {
                    return;
                }
                TerminalReason::after_children(kind)
            }
            Err(lookup) => TerminalReason::StructuralLookup(lookup),
        };

        units.push(InvalidUnit::report(path, kind, node, error, reason));
    }
}

/// Whether `document` conforms to the schema of `validator`.
pub fn geojson_is_valid<V: DocumentValidator + ?Sized>(validator: &V, document: &Value) -> bool {
    PartialValidator::new(validator).is_valid(document)
}

/// Whether `document` conforms, returning the violations instead of `false`.
///
/// # Errors
///
/// The [`SchemaValidationError`] for `document`.
pub fn geojson_is_valid_strict<V: DocumentValidator + ?Sized>(
    validator: &V,
    document: &Value,
) -> Result<bool, SchemaValidationError> {
    PartialValidator::new(validator).is_valid_strict(document)
}

/// The first, deepest invalid node of `document`, or `None` if it is valid.
pub fn find_invalid_unit<'a, V: DocumentValidator + ?Sized>(
    validator: &V,
    document: &'a Value,
) -> Option<&'a Value> {
    PartialValidator::new(validator).find_invalid_unit(document)
}

/// The first, deepest invalid unit of `document` with diagnostics.
pub fn locate_invalid_unit<'a, V: DocumentValidator + ?Sized>(
    validator: &V,
    document: &'a Value,
) -> Option<InvalidUnit<'a>> {
    PartialValidator::new(validator).locate_invalid_unit(document)
}

/// Every leaf-level invalid unit of `document`, in depth-first order.
pub fn find_all_invalid_units<'a, V: DocumentValidator + ?Sized>(
    validator: &V,
    document: &'a Value,
) -> Vec<InvalidUnit<'a>> {
    PartialValidator::new(validator).find_all_invalid_units(document)
}

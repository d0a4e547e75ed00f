//! # Invalid Units
//!
//! The result of a descent: a borrowed node of the caller's document, where
//! it sits, what it claims to be, what is wrong with it, and why the search
//! stopped there instead of going deeper.

use std::fmt;

use gjv_core::{GeoJsonKind, NodePath, StructuralLookupError};
use gjv_schema::SchemaValidationError;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Why the descent reported a node rather than one of its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalReason {
    /// The node is a leaf geometry; there is nothing below it.
    LeafGeometry,
    /// The node's `"type"` is missing, not a string, or not a GeoJSON kind.
    UnrecognizedType,
    /// The node is a container, but every child validates on its own.
    NoInvalidChild,
    /// The node is a container lacking the structure its kind requires.
    StructuralLookup(StructuralLookupError),
}

impl TerminalReason {
    /// The reason for a node of `kind` whose children (if any) all validated.
    pub(crate) fn after_children(kind: GeoJsonKind) -> Self {
        if kind.is_container() {
            Self::NoInvalidChild
        } else if kind.is_leaf_geometry() {
            Self::LeafGeometry
        } else {
            Self::UnrecognizedType
        }
    }
}

impl fmt::Display for TerminalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LeafGeometry => f.write_str("leaf geometry"),
            Self::UnrecognizedType => f.write_str("unrecognized type"),
            Self::NoInvalidChild => f.write_str("no child is invalid on its own"),
            Self::StructuralLookup(e) => write!(f, "structural lookup failed: {e}"),
        }
    }
}

impl Serialize for TerminalReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The smallest invalid sub-document found by a descent.
#[derive(Debug, Clone, Serialize)]
pub struct InvalidUnit<'a> {
    /// JSON Pointer from the root document to this node.
    pub path: NodePath,
    /// The node's declared kind.
    pub kind: GeoJsonKind,
    /// Why the descent stopped here.
    pub reason: TerminalReason,
    /// Violations reported for this node validated on its own.
    pub error: SchemaValidationError,
    /// The node itself, borrowed from the root document.
    pub node: &'a Value,
}

impl<'a> InvalidUnit<'a> {
    pub(crate) fn report(
        path: NodePath,
        kind: GeoJsonKind,
        node: &'a Value,
        error: SchemaValidationError,
        reason: TerminalReason,
    ) -> Self {
        tracing::debug!(
            pointer = %path,
            %kind,
            %reason,
            violations = error.count(),
            "reporting invalid unit"
        );
        Self {
            path,
            kind,
            reason,
            error,
            node,
        }
    }

    /// Whether the unit is the root document itself.
    pub fn is_root(&self) -> bool {
        self.path.is_root()
    }
}

impl fmt::Display for InvalidUnit<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pointer = if self.path.is_root() {
            "(root)".to_string()
        } else {
            self.path.to_pointer()
        };
        write!(f, "{pointer} [{}]: {}", self.kind, self.reason)
    }
}

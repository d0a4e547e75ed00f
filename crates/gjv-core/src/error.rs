//! # Error Types
//!
//! Structural lookup failures raised while decomposing a container into its
//! children. These never reach callers of the partial validator: the descent
//! turns them into "this node is the invalid unit".

use thiserror::Error;

use crate::kind::GeoJsonKind;

/// A container document is missing the structure its kind requires.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralLookupError {
    /// The key holding the container's children is absent.
    #[error("{kind} has no \"{key}\" member")]
    MissingKey {
        /// Kind declared by the document's `"type"` tag.
        kind: GeoJsonKind,
        /// The structural key that was expected.
        key: &'static str,
    },

    /// The key is present but does not hold a sequence.
    #[error("{kind} member \"{key}\" is not an array")]
    NotASequence {
        /// Kind declared by the document's `"type"` tag.
        kind: GeoJsonKind,
        /// The structural key that was expected to hold an array.
        key: &'static str,
    },
}

//! # GeoJSON Kind — Classification of the `"type"` Tag
//!
//! Every GeoJSON object declares what it is through its `"type"` member.
//! [`GeoJsonKind`] is the single closed classification of that tag: the six
//! leaf geometries, the three containers, and `Unrecognized` for anything
//! else (unknown tag, non-string tag, missing tag, non-object document).
//!
//! Only the containers decompose. Their children live under a fixed key:
//!
//! | Kind | Key | Shape |
//! |------|-----|-------|
//! | `GeometryCollection` | `"geometries"` | array of geometries |
//! | `FeatureCollection` | `"features"` | array of features |
//! | `Feature` | `"geometry"` | one geometry, or `null` |

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::StructuralLookupError;
use crate::path::ChildStep;

/// The kind of a GeoJSON document, as declared by its `"type"` member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeoJsonKind {
    /// A single position.
    Point,
    /// Two or more positions.
    LineString,
    /// An array of linear rings.
    Polygon,
    /// An array of positions.
    MultiPoint,
    /// An array of line strings.
    MultiLineString,
    /// An array of polygons.
    MultiPolygon,
    /// Container of geometries under `"geometries"`.
    GeometryCollection,
    /// Container of one geometry under `"geometry"`.
    Feature,
    /// Container of features under `"features"`.
    FeatureCollection,
    /// Missing, non-string, or unknown `"type"`.
    #[serde(other)]
    Unrecognized,
}

/// Number of recognized `"type"` tags (excludes `Unrecognized`).
pub const GEOJSON_KIND_COUNT: usize = 9;

impl GeoJsonKind {
    /// All recognized kinds, leaves first.
    pub fn all_kinds() -> &'static [GeoJsonKind] {
        &[
            Self::Point,
            Self::LineString,
            Self::Polygon,
            Self::MultiPoint,
            Self::MultiLineString,
            Self::MultiPolygon,
            Self::GeometryCollection,
            Self::Feature,
            Self::FeatureCollection,
        ]
    }

    /// Classify a document by its `"type"` member.
    ///
    /// Non-object documents and objects without a string `"type"` are
    /// `Unrecognized`. The tag is compared as an exact, case-sensitive string.
    pub fn classify(document: &Value) -> Self {
        document
            .get("type")
            .and_then(Value::as_str)
            .map_or(Self::Unrecognized, Self::from_tag)
    }

    /// Map a tag string to its kind; unknown tags are `Unrecognized`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "Point" => Self::Point,
            "LineString" => Self::LineString,
            "Polygon" => Self::Polygon,
            "MultiPoint" => Self::MultiPoint,
            "MultiLineString" => Self::MultiLineString,
            "MultiPolygon" => Self::MultiPolygon,
            "GeometryCollection" => Self::GeometryCollection,
            "Feature" => Self::Feature,
            "FeatureCollection" => Self::FeatureCollection,
            _ => Self::Unrecognized,
        }
    }

    /// The tag string as it appears in documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Point => "Point",
            Self::LineString => "LineString",
            Self::Polygon => "Polygon",
            Self::MultiPoint => "MultiPoint",
            Self::MultiLineString => "MultiLineString",
            Self::MultiPolygon => "MultiPolygon",
            Self::GeometryCollection => "GeometryCollection",
            Self::Feature => "Feature",
            Self::FeatureCollection => "FeatureCollection",
            Self::Unrecognized => "Unrecognized",
        }
    }

    /// The key under which this kind keeps its children, if it has any.
    pub fn child_key(&self) -> Option<&'static str> {
        match self {
            Self::GeometryCollection => Some("geometries"),
            Self::FeatureCollection => Some("features"),
            Self::Feature => Some("geometry"),
            Self::Point
            | Self::LineString
            | Self::Polygon
            | Self::MultiPoint
            | Self::MultiLineString
            | Self::MultiPolygon
            | Self::Unrecognized => None,
        }
    }

    /// Whether documents of this kind decompose into children.
    pub fn is_container(&self) -> bool {
        self.child_key().is_some()
    }

    /// Whether this kind is one of the six leaf geometries.
    pub fn is_leaf_geometry(&self) -> bool {
        matches!(
            self,
            Self::Point
                | Self::LineString
                | Self::Polygon
                | Self::MultiPoint
                | Self::MultiLineString
                | Self::MultiPolygon
        )
    }

    /// Look up the structural children of `document`, assumed to be of this kind.
    ///
    /// Leaves and `Unrecognized` have no children. A `Feature` whose
    /// `"geometry"` is `null` is unlocated and likewise has none.
    ///
    /// # Errors
    ///
    /// [`StructuralLookupError::MissingKey`] if the child key is absent,
    /// [`StructuralLookupError::NotASequence`] if a collection's key does
    /// not hold an array.
    pub fn children<'a>(
        &self,
        document: &'a Value,
    ) -> Result<Vec<(ChildStep, &'a Value)>, StructuralLookupError> {
        let Some(key) = self.child_key() else {
            return Ok(Vec::new());
        };

        let member = document
            .get(key)
            .ok_or(StructuralLookupError::MissingKey { kind: *self, key })?;

        match self {
            Self::Feature => {
                if member.is_null() {
                    Ok(Vec::new())
                } else {
                    Ok(vec![(ChildStep::key(key), member)])
                }
            }
            _ => {
                let items = member
                    .as_array()
                    .ok_or(StructuralLookupError::NotASequence { kind: *self, key })?;
                Ok(items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| (ChildStep::indexed(key, i), item))
                    .collect())
            }
        }
    }
}

impl fmt::Display for GeoJsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeoJsonKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_tag(s))
    }
}

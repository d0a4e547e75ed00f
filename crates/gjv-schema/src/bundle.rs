//! # Bundled GeoJSON Schemas
//!
//! The root GeoJSON schema and the three sub-schemas it references, embedded
//! with `include_str!` so a validator can always be built without touching
//! the filesystem.
//!
//! Schema `$id`/`id` URIs and `$ref` targets must not be changed without
//! updating [`SCHEMA_URI_PREFIX`]; the retriever resolves references by
//! exact URI.

/// URI prefix shared by every schema in the bundle.
pub const SCHEMA_URI_PREFIX: &str = "http://json-schema.org/geojson/";

/// File name of the root schema that documents are validated against.
pub const ROOT_SCHEMA_FILE: &str = "geojson.json";

/// One schema file of the bundle.
#[derive(Debug, Clone, Copy)]
pub struct BundledSchema {
    /// File name, both under `schemas/` and as the last URI segment.
    pub file_name: &'static str,
    /// Raw JSON text.
    pub contents: &'static str,
}

/// The complete bundle, root first.
pub const GEOJSON_SCHEMA_BUNDLE: [BundledSchema; 4] = [
    BundledSchema {
        file_name: ROOT_SCHEMA_FILE,
        contents: include_str!("../schemas/geojson.json"),
    },
    BundledSchema {
        file_name: "crs.json",
        contents: include_str!("../schemas/crs.json"),
    },
    BundledSchema {
        file_name: "bbox.json",
        contents: include_str!("../schemas/bbox.json"),
    },
    BundledSchema {
        file_name: "geometry.json",
        contents: include_str!("../schemas/geometry.json"),
    },
];

/// The URI a bundle file is registered under, e.g.
/// `http://json-schema.org/geojson/crs.json`.
pub fn schema_uri(file_name: &str) -> String {
    format!("{SCHEMA_URI_PREFIX}{file_name}")
}

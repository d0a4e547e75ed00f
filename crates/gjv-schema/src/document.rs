//! # Document Loading
//!
//! Reads a GeoJSON document from disk into a [`serde_json::Value`]. The
//! parser is picked from the file extension: `.yaml`/`.yml` go through
//! `serde_yaml`, everything else (`.json`, `.geojson`, no extension) through
//! `serde_json`.

use std::path::Path;

use serde_json::Value;

use crate::validate::LoadError;

/// Load and parse the document at `path`.
///
/// # Errors
///
/// [`LoadError::DocumentLoad`] if the file cannot be read or is
/// not well-formed for its format.
pub fn load_document(path: &Path) -> Result<Value, LoadError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| LoadError::DocumentLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match ext {
        "yaml" | "yml" => {
            serde_yaml::from_str(&content).map_err(|e| LoadError::DocumentLoad {
                path: path.display().to_string(),
                reason: format!("YAML parse error: {e}"),
            })
        }
        _ => serde_json::from_str(&content).map_err(|e| LoadError::DocumentLoad {
            path: path.display().to_string(),
            reason: format!("JSON parse error: {e}"),
        }),
    }
}

//! # Runtime Schema Validation
//!
//! Validates JSON values against the GeoJSON schema (Draft 4). Resolves
//! `$ref` URIs internally by mapping `http://json-schema.org/geojson/{name}`
//! to the pre-loaded schema documents.
//!
//! ## Design
//!
//! [`SchemaValidator`] loads the four bundle documents, registers them by URI
//! for `$ref` resolution, and compiles the root schema exactly once. The
//! compiled validator is immutable afterward, so one instance serves every
//! caller on every thread. Validation errors carry the JSON Pointer of the
//! violating value, the schema path of the violated keyword, and a
//! human-readable message.
//!
//! [`bundled()`] memoizes a validator built from the embedded bundle for
//! the lifetime of the process.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::OnceLock;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::bundle::{schema_uri, GEOJSON_SCHEMA_BUNDLE, ROOT_SCHEMA_FILE};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// A single violated schema constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// JSON Pointer to the violating value within the validated document.
    pub instance_path: String,
    /// JSON Pointer to the violated keyword within the schema.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.instance_path, self.message)
        }
    }
}

/// A document does not conform to the GeoJSON schema.
///
/// This is the only error validation itself can produce: faults loading or
/// compiling the schema surface as [`LoadError`] when the validator is built.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{}", summarize(.violations))]
pub struct SchemaValidationError {
    violations: Vec<Violation>,
}

fn summarize(violations: &[Violation]) -> String {
    match violations.first() {
        Some(first) => format!(
            "{} GeoJSON schema violation(s); first: {first}",
            violations.len()
        ),
        None => "GeoJSON schema violation".to_string(),
    }
}

impl SchemaValidationError {
    /// Wrap the violations reported for one document.
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Number of violations.
    pub fn count(&self) -> usize {
        self.violations.len()
    }

    /// The individual violations, in the order the engine reported them.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

/// Errors building a validator or reading a document.
#[derive(Error, Debug)]
pub enum LoadError {
    /// A schema file could not be read or parsed.
    #[error("failed to load schema {path}: {reason}")]
    SchemaLoad {
        /// Path or file name of the schema.
        path: String,
        /// Human-readable reason for the failure.
        reason: String,
    },

    /// A document could not be read or parsed.
    #[error("failed to load document {path}: {reason}")]
    DocumentLoad {
        /// Path to the document.
        path: String,
        /// Human-readable reason for the failure.
        reason: String,
    },

    /// The root schema could not be compiled.
    #[error("failed to compile schema {schema_uri}: {reason}")]
    SchemaCompile {
        /// URI of the schema being compiled.
        schema_uri: String,
        /// Human-readable reason.
        reason: String,
    },

    /// A schema URI is not part of the loaded bundle.
    #[error("schema not found: {0}")]
    SchemaNotFound(String),
}

// ---------------------------------------------------------------------------
// Validator contract
// ---------------------------------------------------------------------------

/// Single-document schema conformance check.
///
/// Implementations must not mutate the document and must be safe to call
/// concurrently from multiple threads.
pub trait DocumentValidator: Send + Sync {
    /// Returns `Ok(())` if `document` conforms, otherwise the violations found.
    fn validate(&self, document: &Value) -> Result<(), SchemaValidationError>;
}

// ---------------------------------------------------------------------------
// Schema retriever for $ref resolution
// ---------------------------------------------------------------------------

/// Resolves `$ref` URIs from the pre-loaded bundle.
///
/// Unknown URIs are an error rather than a network fetch.
struct LocalSchemaRetriever {
    /// Map from URI (no fragment) to parsed schema JSON.
    schemas: HashMap<String, Value>,
}

impl jsonschema::Retrieve for LocalSchemaRetriever {
    fn retrieve(
        &self,
        uri: &jsonschema::Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str().trim_end_matches('#');
        self.schemas
            .get(uri_str)
            .cloned()
            .ok_or_else(|| format!("schema not found for URI: {uri_str}").into())
    }
}

// ---------------------------------------------------------------------------
// SchemaValidator
// ---------------------------------------------------------------------------

/// Where a validator's schema documents came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource {
    /// The copies embedded in the binary.
    Bundled,
    /// Files read from a directory at construction time.
    Directory(PathBuf),
}

/// A compiled GeoJSON schema validator.
pub struct SchemaValidator {
    source: SchemaSource,
    /// Schema documents indexed by URI (no fragment).
    schemas: HashMap<String, Value>,
    compiled: jsonschema::Validator,
}

impl fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("source", &self.source)
            .field("schema_count", &self.schemas.len())
            .finish()
    }
}

impl SchemaValidator {
    /// Build a validator from the schema copies embedded in the crate.
    ///
    /// # Errors
    ///
    /// [`LoadError::SchemaLoad`] if an embedded file is not valid
    /// JSON, [`LoadError::SchemaCompile`] if the root schema does
    /// not compile.
    pub fn bundled() -> Result<Self, LoadError> {
        let mut schemas = HashMap::new();
        for schema in &GEOJSON_SCHEMA_BUNDLE {
            let value = parse_schema(schema.file_name, schema.contents)?;
            schemas.insert(schema_uri(schema.file_name), value);
        }
        Self::compile(SchemaSource::Bundled, schemas)
    }

    /// Build a validator from bundle files found in `schema_dir`.
    ///
    /// Every file name of the bundle must be present in the directory; other
    /// files are ignored.
    ///
    /// # Errors
    ///
    /// [`LoadError::SchemaLoad`] if the directory or any bundle
    /// file cannot be read or parsed, [`LoadError::SchemaCompile`]
    /// if the root schema does not compile.
    pub fn from_dir(schema_dir: impl Into<PathBuf>) -> Result<Self, LoadError> {
        let schema_dir = schema_dir.into();
        if !schema_dir.is_dir() {
            return Err(LoadError::SchemaLoad {
                path: schema_dir.display().to_string(),
                reason: "not a directory".to_string(),
            });
        }

        let mut schemas = HashMap::new();
        for schema in &GEOJSON_SCHEMA_BUNDLE {
            let path = schema_dir.join(schema.file_name);
            let content = std::fs::read_to_string(&path).map_err(|e| {
                LoadError::SchemaLoad {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                }
            })?;
            let value = parse_schema(&path.display().to_string(), &content)?;
            schemas.insert(schema_uri(schema.file_name), value);
        }

        tracing::debug!(schema_dir = %schema_dir.display(), "loaded schema bundle from disk");
        Self::compile(SchemaSource::Directory(schema_dir), schemas)
    }

    fn compile(
        source: SchemaSource,
        schemas: HashMap<String, Value>,
    ) -> Result<Self, LoadError> {
        let root_uri = schema_uri(ROOT_SCHEMA_FILE);
        let root = schemas
            .get(&root_uri)
            .ok_or_else(|| LoadError::SchemaNotFound(root_uri.clone()))?;

        let retriever = LocalSchemaRetriever {
            schemas: schemas.clone(),
        };

        let compiled = jsonschema::options()
            .with_draft(jsonschema::Draft::Draft4)
            .with_retriever(retriever)
            .build(root)
            .map_err(|e| LoadError::SchemaCompile {
                schema_uri: root_uri.clone(),
                reason: e.to_string(),
            })?;

        tracing::debug!(schema_count = schemas.len(), "compiled GeoJSON schema");

        Ok(Self {
            source,
            schemas,
            compiled,
        })
    }

    /// Where the schema documents came from.
    pub fn source(&self) -> &SchemaSource {
        &self.source
    }

    /// Number of schema documents loaded.
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    /// URIs of all loaded schema documents, sorted.
    pub fn schema_uris(&self) -> Vec<&str> {
        let mut uris: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        uris.sort_unstable();
        uris
    }

    /// Look up a loaded schema document by URI. A trailing `#` is ignored.
    pub fn get_schema(&self, uri: &str) -> Option<&Value> {
        self.schemas.get(uri.trim_end_matches('#'))
    }

    /// Validate `document` against the root GeoJSON schema.
    ///
    /// # Errors
    ///
    /// [`SchemaValidationError`] with every violation found.
    pub fn validate(&self, document: &Value) -> Result<(), SchemaValidationError> {
        let violations: Vec<Violation> = self
            .compiled
            .iter_errors(document)
            .map(|err| Violation {
                instance_path: err.instance_path.to_string(),
                schema_path: err.schema_path.to_string(),
                message: err.to_string(),
            })
            .collect();

        if violations.is_empty() {
            return Ok(());
        }

        tracing::debug!(
            count = violations.len(),
            first = %violations[0],
            "GeoJSON failed to validate"
        );
        Err(SchemaValidationError::new(violations))
    }

    /// Whether `document` conforms, without collecting violations.
    pub fn is_valid(&self, document: &Value) -> bool {
        self.compiled.is_valid(document)
    }
}

impl DocumentValidator for SchemaValidator {
    fn validate(&self, document: &Value) -> Result<(), SchemaValidationError> {
        SchemaValidator::validate(self, document)
    }
}

fn parse_schema(name: &str, content: &str) -> Result<Value, LoadError> {
    let mut value = serde_json::from_str(content).map_err(|e| LoadError::SchemaLoad {
        path: name.to_string(),
        reason: e.to_string(),
    })?;
    strip_empty_fragments(&mut value);
    Ok(value)
}

/// Drop a trailing empty fragment from `id` and absolute `$ref` values.
///
/// Published copies of the GeoJSON schemas write `.../geometry.json#`; the
/// engine refuses to resolve against a base URI carrying a fragment.
/// Local refs (`#/definitions/...`) are left alone.
fn strip_empty_fragments(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, member) in map.iter_mut() {
                match member {
                    Value::String(uri) if key == "id" || key == "$ref" => {
                        if uri.len() > 1 && uri.ends_with('#') {
                            uri.pop();
                        }
                    }
                    other => strip_empty_fragments(other),
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(strip_empty_fragments),
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// Process-wide instance
// ---------------------------------------------------------------------------

static BUNDLED: OnceLock<Result<SchemaValidator, LoadError>> = OnceLock::new();

/// The process-wide validator built from the embedded bundle.
///
/// Built on first call and reused for the rest of the process. A build
/// failure is memoized too, and every call reports the same error.
pub fn bundled() -> Result<&'static SchemaValidator, &'static LoadError> {
    BUNDLED.get_or_init(SchemaValidator::bundled).as_ref()
}

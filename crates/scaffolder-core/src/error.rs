//! Error types for scaffolding operations

use std::path::PathBuf;
use thiserror::Error;

/// Domain failures raised while scaffolding.
///
/// I/O failures are not listed here; they travel as `anyhow` errors with the
/// offending path attached as context.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// A template file expected in the tree was not found.
    #[error("Template file not found: {0}")]
    TemplateNotFound(String),

    /// The local template directory does not exist.
    #[error("Template directory not found: {0:?}")]
    TemplateDirNotFound(PathBuf),

    /// An existing YAML document could not be parsed.
    #[error("Failed to parse YAML in {path:?}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// An existing JSON document could not be parsed.
    #[error("Failed to parse JSON in {path:?}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// `package.json` is not a JSON object at the top level.
    #[error("{0:?} must contain a JSON object")]
    ManifestNotObject(PathBuf),

    /// A dependency section of `package.json` is not a JSON object.
    #[error("\"{section}\" in {path:?} must be a JSON object")]
    SectionNotObject { path: PathBuf, section: String },

    /// `package.json` has no usable `name` field.
    #[error("{0:?} has no string \"name\" field")]
    MissingProjectName(PathBuf),
}

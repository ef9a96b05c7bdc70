//! Key writes into YAML configuration files
//!
//! A key path is dot-delimited (`extensions.aem/spa/1`). Writing sets the value at
//! that path, replacing whatever was there, so repeating a write is a no-op.

use super::{ProjectContext, APP_CONFIG};
use crate::error::ScaffoldError;
use crate::templates::copier::write_file;
use crate::templates::{ChangeStatus, FileChange};
use anyhow::{Context, Result};
use serde_yaml::{Mapping, Value};
use std::path::Path;
use tokio::fs;

/// Set `key_path` in the project's root `app.config.yaml`
pub async fn write_key_app_config(
    project: &ProjectContext,
    key_path: &str,
    value: Value,
) -> Result<FileChange> {
    write_key_yaml_config(&project.path(APP_CONFIG), key_path, value).await
}

/// Set `key_path` in a YAML file, creating the file and intermediate mappings as needed
pub async fn write_key_yaml_config(
    path: &Path,
    key_path: &str,
    value: Value,
) -> Result<FileChange> {
    let mut document = read_yaml(path).await?;
    let before = document.clone();

    let segments: Vec<&str> = key_path.split('.').collect();
    set_key(&mut document, &segments, value);

    if path.exists() && document == before {
        return Ok(FileChange::new(path, ChangeStatus::Identical));
    }

    let content = serde_yaml::to_string(&document)
        .with_context(|| format!("Failed to serialize {}", path.display()))?;
    write_file(path, content.as_bytes(), ChangeStatus::Updated).await
}

/// Read a YAML document; a missing or blank file is an empty mapping
async fn read_yaml(path: &Path) -> Result<Value> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", path.display()));
        }
    };

    if content.trim().is_empty() {
        return Ok(Value::Mapping(Mapping::new()));
    }

    serde_yaml::from_str(&content).map_err(|source| {
        ScaffoldError::Yaml {
            path: path.to_path_buf(),
            source,
        }
        .into()
    })
}

/// Set a value at a key path; anything that is not a mapping along the way is replaced
fn set_key(node: &mut Value, segments: &[&str], value: Value) {
    let Some((first, rest)) = segments.split_first() else {
        *node = value;
        return;
    };

    if !node.is_mapping() {
        *node = Value::Mapping(Mapping::new());
    }

    if let Value::Mapping(map) = node {
        let child = map
            .entry(Value::String((*first).to_string()))
            .or_insert(Value::Null);
        set_key(child, rest, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn include(path: &str) -> Value {
        let mut map = Mapping::new();
        map.insert("$include".into(), path.into());
        Value::Mapping(map)
    }

    #[test]
    fn test_set_key_creates_intermediate_mappings() {
        let mut doc = Value::Mapping(Mapping::new());
        set_key(&mut doc, &["a", "b", "c"], Value::from(1));
        assert_eq!(doc["a"]["b"]["c"], Value::from(1));
    }

    #[test]
    fn test_set_key_replaces_scalar_in_the_way() {
        let mut doc: Value = serde_yaml::from_str("a: 5").unwrap();
        set_key(&mut doc, &["a", "b"], Value::from("x"));
        assert_eq!(doc["a"]["b"], Value::from("x"));
    }

    #[tokio::test]
    async fn test_write_key_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("ext.config.yaml");

        let change = write_key_yaml_config(&path, "web", Value::from("web-src"))
            .await
            .unwrap();
        assert_eq!(change.status, ChangeStatus::Created);

        let doc: Value = serde_yaml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(doc["web"], Value::from("web-src"));
    }

    #[tokio::test]
    async fn test_write_key_preserves_other_keys_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let project = ProjectContext::new(dir.path());
        std::fs::write(
            project.path(APP_CONFIG),
            "application:\n  actions: actions\nextensions:\n  other/1:\n    $include: other.yaml\n",
        )
        .unwrap();

        let first = write_key_app_config(&project, "extensions.aem/spa/1", include("a.yaml"))
            .await
            .unwrap();
        assert_eq!(first.status, ChangeStatus::Updated);

        let second = write_key_app_config(&project, "extensions.aem/spa/1", include("a.yaml"))
            .await
            .unwrap();
        assert_eq!(second.status, ChangeStatus::Identical);

        let doc: Value =
            serde_yaml::from_str(&std::fs::read_to_string(project.path(APP_CONFIG)).unwrap())
                .unwrap();
        let extensions = doc["extensions"].as_mapping().unwrap();
        assert_eq!(extensions.len(), 2);
        assert_eq!(doc["extensions"]["aem/spa/1"]["$include"], Value::from("a.yaml"));
        assert_eq!(doc["application"]["actions"], Value::from("actions"));
    }

    #[tokio::test]
    async fn test_malformed_yaml_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "a: [unclosed").unwrap();

        let err = write_key_yaml_config(&path, "a", Value::from(1))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to parse YAML"));
    }
}

//! Dependency merging into `package.json`
//!
//! Policy: an entry is added when missing and replaced when the requested range
//! does not lower the version floor. Otherwise the existing entry wins.

use super::version::is_downgrade;
use super::ProjectContext;
use crate::error::ScaffoldError;
use crate::templates::copier::write_file;
use crate::templates::{ChangeStatus, FileChange};
use anyhow::{Context, Result};
use serde_json::{Map, Value};

/// A requested dependency that was not applied because it would downgrade
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeptDependency {
    pub name: String,
    pub existing: String,
    pub requested: String,
}

/// Outcome of a dependency merge
#[derive(Debug, Clone)]
pub struct DependencyMerge {
    pub change: FileChange,
    pub kept: Vec<KeptDependency>,
}

/// Merge `deps` into `dependencies` (or `devDependencies` when `dev` is set)
pub async fn add_dependencies(
    project: &ProjectContext,
    deps: &[(&str, &str)],
    dev: bool,
) -> Result<DependencyMerge> {
    let path = project.package_json_path();
    let section_name = if dev { "devDependencies" } else { "dependencies" };

    let mut manifest = project.read_package_json().await?;
    let before = manifest.clone();

    let root = manifest
        .as_object_mut()
        .ok_or_else(|| ScaffoldError::ManifestNotObject(path.clone()))?;
    let section = root
        .entry(section_name)
        .or_insert_with(|| Value::Object(Map::new()));
    let Value::Object(section) = section else {
        return Err(ScaffoldError::SectionNotObject {
            path,
            section: section_name.to_string(),
        }
        .into());
    };

    let kept = merge_section(section, deps);

    if manifest == before {
        return Ok(DependencyMerge {
            change: FileChange::new(path, ChangeStatus::Identical),
            kept,
        });
    }

    let mut content = serde_json::to_string_pretty(&manifest)
        .with_context(|| format!("Failed to serialize {}", path.display()))?;
    content.push('\n');

    let change = write_file(&path, content.as_bytes(), ChangeStatus::Updated).await?;
    Ok(DependencyMerge { change, kept })
}

fn merge_section(section: &mut Map<String, Value>, deps: &[(&str, &str)]) -> Vec<KeptDependency> {
    let mut kept = Vec::new();

    for (name, requested) in deps {
        let existing = section
            .get(*name)
            .and_then(Value::as_str)
            .map(str::to_string);

        match existing {
            Some(existing) if existing == *requested => {}
            Some(existing) if is_downgrade(&existing, requested) => kept.push(KeptDependency {
                name: name.to_string(),
                existing,
                requested: requested.to_string(),
            }),
            _ => {
                section.insert(name.to_string(), Value::String(requested.to_string()));
            }
        }
    }

    kept
}

//! Helpers that read and mutate files of an existing project
//!
//! This module provides:
//! - `package.json` reading (`ProjectContext`)
//! - Idempotent key writes into YAML config files (`config`)
//! - Dependency merging into `package.json` (`dependencies`)
//! - Commented placeholder blocks for `.env` (`dotenv`)

pub mod config;
pub mod dependencies;
pub mod dotenv;
pub mod version;

use crate::error::ScaffoldError;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

pub use config::{write_key_app_config, write_key_yaml_config};
pub use dependencies::{add_dependencies, DependencyMerge};
pub use dotenv::append_stub_vars_to_dotenv;

/// Project manifest file name
pub const PACKAGE_JSON: &str = "package.json";

/// Root App Builder configuration file name
pub const APP_CONFIG: &str = "app.config.yaml";

/// Dotenv file name
pub const DOTENV: &str = ".env";

/// The project a generator writes into
#[derive(Debug, Clone)]
pub struct ProjectContext {
    root: PathBuf,
}

impl ProjectContext {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Use the current working directory as project root
    pub fn current_dir() -> Result<Self> {
        let root = std::env::current_dir().context("Failed to resolve current directory")?;
        Ok(Self::new(root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a project-relative path
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    pub fn package_json_path(&self) -> PathBuf {
        self.path(PACKAGE_JSON)
    }

    /// Read and parse `package.json`
    pub async fn read_package_json(&self) -> Result<serde_json::Value> {
        let path = self.package_json_path();
        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let manifest: serde_json::Value = serde_json::from_str(&content)
            .map_err(|source| ScaffoldError::Json {
                path: path.clone(),
                source,
            })?;
        if !manifest.is_object() {
            return Err(ScaffoldError::ManifestNotObject(path).into());
        }
        Ok(manifest)
    }

    /// The `name` field of `package.json`
    pub async fn project_name(&self) -> Result<String> {
        let manifest = self.read_package_json().await?;
        manifest
            .get("name")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ScaffoldError::MissingProjectName(self.package_json_path()).into())
    }
}

//! Template loading from the built-in set or a local directory
//!
//! Both sources produce the same `TemplateTree` so generators behave identically
//! whether they run against the templates compiled into the binary or against a
//! working copy on disk during template development.

use crate::error::ScaffoldError;
use anyhow::{Context, Result};
use rust_embed::RustEmbed;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

#[derive(RustEmbed)]
#[folder = "templates/app/"]
struct AppTemplates;

#[derive(RustEmbed)]
#[folder = "templates/spa-web-src/"]
struct SpaWebSrcTemplates;

/// The template trees shipped with the generators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    /// Starter project laid down by the `app` generator
    App,
    /// React web sources for the AEM SPA extension
    SpaWebSrc,
}

impl TemplateKind {
    /// Directory name of this tree, both in the crate and in a local template dir
    pub fn dir_name(&self) -> &'static str {
        match self {
            TemplateKind::App => "app",
            TemplateKind::SpaWebSrc => "spa-web-src",
        }
    }
}

/// Template source - either compiled into the binary or a local directory
#[derive(Debug, Clone)]
pub enum TemplateSource {
    Embedded,
    Local(PathBuf),
}

impl TemplateSource {
    /// Local source if a directory was given, embedded templates otherwise
    pub fn from_dir(template_dir: Option<PathBuf>) -> Self {
        match template_dir {
            Some(path) => Self::Local(path),
            None => Self::Embedded,
        }
    }
}

/// In-memory template files keyed by `/`-separated relative path
#[derive(Debug, Clone, Default)]
pub struct TemplateTree {
    files: BTreeMap<String, Vec<u8>>,
}

impl TemplateTree {
    pub fn insert(&mut self, path: impl Into<String>, content: Vec<u8>) {
        self.files.insert(path.into(), content);
    }

    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    /// Files in path order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.files
            .iter()
            .map(|(path, content)| (path.as_str(), content.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Template fetcher - loads template trees and caches them per kind
pub struct TemplateFetcher {
    source: TemplateSource,
    cache: HashMap<TemplateKind, TemplateTree>,
}

impl TemplateFetcher {
    pub fn new(source: TemplateSource) -> Self {
        Self {
            source,
            cache: HashMap::new(),
        }
    }

    /// Create a fetcher for the built-in templates
    pub fn embedded() -> Self {
        Self::new(TemplateSource::Embedded)
    }

    /// Create a fetcher for local templates
    pub fn from_local(path: PathBuf) -> Self {
        Self::new(TemplateSource::Local(path))
    }

    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    /// Fetch a template tree, loading it on first use
    pub async fn fetch_tree(&mut self, kind: TemplateKind) -> Result<&TemplateTree> {
        let tree = match self.cache.remove(&kind) {
            Some(tree) => tree,
            None => match &self.source {
                TemplateSource::Embedded => embedded_tree(kind),
                TemplateSource::Local(dir) => local_tree(&dir.join(kind.dir_name())).await?,
            },
        };
        Ok(self.cache.entry(kind).or_insert(tree))
    }
}

fn embedded_tree(kind: TemplateKind) -> TemplateTree {
    match kind {
        TemplateKind::App => collect_embedded::<AppTemplates>(),
        TemplateKind::SpaWebSrc => collect_embedded::<SpaWebSrcTemplates>(),
    }
}

fn collect_embedded<E: RustEmbed>() -> TemplateTree {
    let mut tree = TemplateTree::default();
    for name in E::iter() {
        if let Some(file) = E::get(&name) {
            tree.insert(name.into_owned(), file.data.into_owned());
        }
    }
    tree
}

async fn local_tree(dir: &Path) -> Result<TemplateTree> {
    if !dir.is_dir() {
        return Err(ScaffoldError::TemplateDirNotFound(dir.to_path_buf()).into());
    }

    let mut paths = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry.with_context(|| format!("Failed to walk {}", dir.display()))?;
        if entry.file_type().is_file() {
            paths.push(entry.into_path());
        }
    }

    let mut tree = TemplateTree::default();
    for path in paths {
        let relative = path
            .strip_prefix(dir)
            .with_context(|| format!("{} is outside {}", path.display(), dir.display()))?;
        let content = fs::read(&path)
            .await
            .with_context(|| format!("Failed to read template {}", path.display()))?;
        tree.insert(super::to_posix(relative), content);
    }

    Ok(tree)
}

//! Template loading, rendering, and copying
//!
//! This module provides:
//! - Template trees from the built-in set or a local directory
//! - Placeholder rendering for file contents and paths
//! - Template copying with the underscore exclusion rule
//! - `FileChange` records describing what each write did

pub mod copier;
pub mod fetcher;
pub mod render;

use std::fmt;
use std::path::PathBuf;

pub use copier::{copy_template, copy_template_file, dotfile_name};
pub use fetcher::{TemplateFetcher, TemplateKind, TemplateSource, TemplateTree};
pub use render::{relative_path, render, render_path, to_posix, TemplateContext};

/// What a write step did to a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeStatus {
    /// The file did not exist before
    Created,
    /// An existing file was replaced by a rendered template
    Overwritten,
    /// The file already had exactly this content
    Identical,
    /// Keys were written into an existing document
    Updated,
    /// Content was appended to an existing file
    Appended,
    /// Nothing was written because the content was already there
    Skipped,
}

impl ChangeStatus {
    /// Short status word, yeoman style
    pub fn label(&self) -> &'static str {
        match self {
            ChangeStatus::Created => "create",
            ChangeStatus::Overwritten => "force",
            ChangeStatus::Identical => "identical",
            ChangeStatus::Updated => "update",
            ChangeStatus::Appended => "append",
            ChangeStatus::Skipped => "skip",
        }
    }

    /// Whether the file on disk was modified
    pub fn is_write(&self) -> bool {
        !matches!(self, ChangeStatus::Identical | ChangeStatus::Skipped)
    }
}

impl fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single file touched by a generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub path: PathBuf,
    pub status: ChangeStatus,
}

impl FileChange {
    pub fn new(path: impl Into<PathBuf>, status: ChangeStatus) -> Self {
        Self {
            path: path.into(),
            status,
        }
    }
}

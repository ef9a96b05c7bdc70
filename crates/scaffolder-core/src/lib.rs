//! Scaffolder Core - Shared library for the AEM SPA scaffolding CLI
//!
//! This library provides the generators behind `aem-spa-tools`: one that lays
//! down a fresh project from a template tree, and one that adds an AEM SPA
//! extension point to an existing App Builder project.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Template loading, rendering and copying, plus the
//!   project file helpers (YAML keys, `package.json` dependencies, `.env` stubs)
//! - **Layer 2: Generators** - `generators::app` and `generators::extension`, each an
//!   explicit sequence of phase functions returning the files they touched
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based session output (feature-gated)
//!   and a plain colored reporter
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based session module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use scaffolder_core::{generators, templates::TemplateFetcher, GeneratorOptions};
//!
//! let mut fetcher = TemplateFetcher::embedded();
//! let options = GeneratorOptions::new(".", "my-app");
//! let changes = generators::app::run(&options, &mut fetcher).await?;
//! scaffolder_core::report::print_changes(&changes);
//! ```

pub mod error;
pub mod generators;
pub mod project;
pub mod report;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use error::ScaffoldError;
pub use generators::app::GeneratorOptions;
pub use generators::extension::ExtensionDescriptor;
pub use project::ProjectContext;
pub use templates::{
    copy_template, render, ChangeStatus, FileChange, TemplateContext, TemplateFetcher,
    TemplateKind, TemplateSource,
};

/// Environment variable that points the CLI at a local template directory
pub const TEMPLATE_DIR_ENV: &str = "AEM_SPA_TEMPLATE_DIR";

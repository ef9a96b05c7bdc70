//! Project generator: lays down the starter template into a destination folder

use crate::templates::{
    copy_template, copy_template_file, FileChange, TemplateContext, TemplateFetcher, TemplateKind,
};
use anyhow::Result;
use std::path::PathBuf;

/// Project name used when none is given
pub const DEFAULT_PROJECT_NAME: &str = "project-name-not-set";

/// Template renamed to `.gitignore` on copy
const GITIGNORE_TEMPLATE: &str = "_dot.gitignore";
const GITIGNORE: &str = ".gitignore";

/// Inputs of the project generator, fixed for the whole run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub dest_folder: PathBuf,
    pub project_name: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            dest_folder: PathBuf::from("."),
            project_name: DEFAULT_PROJECT_NAME.to_string(),
        }
    }
}

impl GeneratorOptions {
    pub fn new(dest_folder: impl Into<PathBuf>, project_name: impl Into<String>) -> Self {
        Self {
            dest_folder: dest_folder.into(),
            project_name: project_name.into(),
        }
    }

    /// Values available to the templates
    pub fn template_context(&self) -> TemplateContext {
        TemplateContext::new()
            .with("destFolder", self.dest_folder.to_string_lossy())
            .with("projectName", self.project_name.as_str())
    }
}

/// Run the project generator
pub async fn run(
    options: &GeneratorOptions,
    fetcher: &mut TemplateFetcher,
) -> Result<Vec<FileChange>> {
    writing(options, fetcher).await
}

async fn writing(
    options: &GeneratorOptions,
    fetcher: &mut TemplateFetcher,
) -> Result<Vec<FileChange>> {
    let context = options.template_context();
    let tree = fetcher.fetch_tree(TemplateKind::App).await?;

    // Everything except underscore-prefixed files
    let mut changes = copy_template(tree, &options.dest_folder, &context).await?;

    // Packaging drops .gitignore files, so the template ships as _dot.gitignore
    changes.push(
        copy_template_file(
            tree,
            GITIGNORE_TEMPLATE,
            &options.dest_folder.join(GITIGNORE),
            &context,
        )
        .await?,
    );

    Ok(changes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::{dotfile_name, ChangeStatus};

    #[test]
    fn test_default_options() {
        let options = GeneratorOptions::default();
        assert_eq!(options.dest_folder, PathBuf::from("."));
        assert_eq!(options.project_name, "project-name-not-set");
    }

    #[test]
    fn test_gitignore_follows_dotfile_convention() {
        assert_eq!(dotfile_name(GITIGNORE_TEMPLATE), Some(GITIGNORE));
    }

    #[test]
    fn test_template_context() {
        let context = GeneratorOptions::new("out", "my-app").template_context();
        assert_eq!(context.get("projectName"), Some("my-app"));
        assert_eq!(context.get("destFolder"), Some("out"));
    }

    #[tokio::test]
    async fn test_run_writes_gitignore_and_renders_name() {
        let dir = tempfile::tempdir().unwrap();
        let options = GeneratorOptions::new(dir.path(), "my-app");
        let mut fetcher = TemplateFetcher::embedded();

        let changes = run(&options, &mut fetcher).await.unwrap();
        assert!(changes.iter().all(|c| c.status == ChangeStatus::Created));

        assert!(dir.path().join(".gitignore").is_file());
        assert!(!dir.path().join("_dot.gitignore").exists());

        let package = std::fs::read_to_string(dir.path().join("package.json")).unwrap();
        assert!(package.contains("\"name\": \"my-app\""));
        assert!(!package.contains("<%"));
    }
}

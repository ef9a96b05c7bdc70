//! Template file copying with placeholder rendering

use super::{render, render_path, ChangeStatus, FileChange, TemplateContext, TemplateTree};
use crate::error::ScaffoldError;
use anyhow::{Context, Result};
use std::borrow::Cow;
use std::path::Path;
use tokio::fs;

/// Prefix marking a template that must be renamed to a dotfile on copy
const DOTFILE_PREFIX: &str = "_dot";

/// Copy every template file to the target directory, rendering paths and contents.
///
/// Files whose name starts with an underscore are skipped; callers copy those
/// explicitly with [`copy_template_file`].
pub async fn copy_template(
    tree: &TemplateTree,
    target_dir: &Path,
    context: &TemplateContext,
) -> Result<Vec<FileChange>> {
    // Ensure target directory exists
    fs::create_dir_all(target_dir)
        .await
        .with_context(|| format!("Failed to create directory: {}", target_dir.display()))?;

    let mut changes = Vec::new();

    for (file_path, content) in tree.iter() {
        if !should_include_file(file_path) {
            continue;
        }

        let target_path = target_dir.join(render_path(file_path, context));
        let rendered = render_content(content, context);
        changes.push(write_file(&target_path, &rendered, ChangeStatus::Overwritten).await?);
    }

    Ok(changes)
}

/// Copy a single template file to an explicit destination
pub async fn copy_template_file(
    tree: &TemplateTree,
    template_path: &str,
    target_path: &Path,
    context: &TemplateContext,
) -> Result<FileChange> {
    let content = tree
        .get(template_path)
        .ok_or_else(|| ScaffoldError::TemplateNotFound(template_path.to_string()))?;
    let rendered = render_content(content, context);
    write_file(target_path, &rendered, ChangeStatus::Overwritten).await
}

/// Destination name of a `_dot`-prefixed template (`_dot.gitignore` -> `.gitignore`)
pub fn dotfile_name(template_name: &str) -> Option<&str> {
    template_name
        .strip_prefix(DOTFILE_PREFIX)
        .filter(|rest| rest.starts_with('.') && rest.len() > 1)
}

/// Write `contents` to `path`, creating parent directories.
///
/// An existing file with the same bytes is left alone and reported `Identical`;
/// an existing file with different bytes is reported with `replaced`.
pub(crate) async fn write_file(
    path: &Path,
    contents: &[u8],
    replaced: ChangeStatus,
) -> Result<FileChange> {
    let status = match fs::read(path).await {
        Ok(existing) if existing == contents => {
            return Ok(FileChange::new(path, ChangeStatus::Identical));
        }
        Ok(_) => replaced,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => ChangeStatus::Created,
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read file: {}", path.display()))
        }
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, contents)
        .await
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    Ok(FileChange::new(path, status))
}

/// Underscore-prefixed files are never copied by the bulk copy
fn should_include_file(file_path: &str) -> bool {
    let filename = file_path.rsplit('/').next().unwrap_or(file_path);
    !filename.starts_with('_')
}

/// Render text templates; binary files are copied verbatim
fn render_content<'a>(content: &'a [u8], context: &TemplateContext) -> Cow<'a, [u8]> {
    match std::str::from_utf8(content) {
        Ok(text) => Cow::Owned(render(text, context).into_bytes()),
        Err(_) => Cow::Borrowed(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> TemplateTree {
        let mut tree = TemplateTree::default();
        tree.insert("README.md", b"# <%= projectName %>\n".to_vec());
        tree.insert(
            "src/<%= projectName %>.js",
            b"export default '<%= projectName %>'\n".to_vec(),
        );
        tree.insert("_dot.gitignore", b"node_modules\n".to_vec());
        tree.insert("docs/_draft.md", b"draft".to_vec());
        tree.insert("logo.bin", vec![0xff, 0xfe, 0x00]);
        tree
    }

    fn context() -> TemplateContext {
        TemplateContext::new().with("projectName", "my-app")
    }

    #[test]
    fn test_underscore_files_excluded() {
        assert!(should_include_file("README.md"));
        assert!(should_include_file("src/_internal/index.js"));
        assert!(!should_include_file("_dot.gitignore"));
        assert!(!should_include_file("docs/_draft.md"));
    }

    #[test]
    fn test_dotfile_name() {
        assert_eq!(dotfile_name("_dot.gitignore"), Some(".gitignore"));
        assert_eq!(dotfile_name("_dot.env.example"), Some(".env.example"));
        assert_eq!(dotfile_name("_dot."), None);
        assert_eq!(dotfile_name("_config.yaml"), None);
    }

    #[tokio::test]
    async fn test_copy_template_renders_paths_and_contents() {
        let dir = tempfile::tempdir().unwrap();
        let changes = copy_template(&tree(), dir.path(), &context()).await.unwrap();

        assert_eq!(changes.len(), 3);
        assert!(changes.iter().all(|c| c.status == ChangeStatus::Created));

        let readme = std::fs::read_to_string(dir.path().join("README.md")).unwrap();
        assert_eq!(readme, "# my-app\n");
        let js = std::fs::read_to_string(dir.path().join("src").join("my-app.js")).unwrap();
        assert_eq!(js, "export default 'my-app'\n");
        assert_eq!(
            std::fs::read(dir.path().join("logo.bin")).unwrap(),
            vec![0xff, 0xfe, 0x00]
        );
        assert!(!dir.path().join("_dot.gitignore").exists());
        assert!(!dir.path().join("docs").exists());
    }

    #[tokio::test]
    async fn test_copy_template_overwrites_and_detects_identical() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("README.md"), "old").unwrap();

        let first = copy_template(&tree(), dir.path(), &context()).await.unwrap();
        let readme = first
            .iter()
            .find(|c| c.path.ends_with("README.md"))
            .unwrap();
        assert_eq!(readme.status, ChangeStatus::Overwritten);

        let second = copy_template(&tree(), dir.path(), &context()).await.unwrap();
        assert!(second.iter().all(|c| c.status == ChangeStatus::Identical));
    }

    #[tokio::test]
    async fn test_copy_template_keeps_absolute_names_inside_target() {
        let dir = tempfile::tempdir().unwrap();
        let outside = tempfile::tempdir().unwrap();
        let escaped = outside.path().join("escaped");

        let mut tree = TemplateTree::default();
        tree.insert("<%= projectName %>.txt", b"x".to_vec());
        let context = TemplateContext::new().with("projectName", escaped.to_string_lossy());

        let changes = copy_template(&tree, dir.path(), &context).await.unwrap();

        assert_eq!(changes.len(), 1);
        assert!(changes[0].path.starts_with(dir.path()));
        assert!(changes[0].path.is_file());
        assert!(!outside.path().join("escaped.txt").exists());
    }

    #[tokio::test]
    async fn test_copy_template_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = copy_template_file(&tree(), "_nope", &dir.path().join("x"), &context())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Template file not found"));
    }
}

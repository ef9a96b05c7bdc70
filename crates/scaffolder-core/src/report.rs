//! Plain colored output for non-interactive runs

use crate::project::dependencies::KeptDependency;
use crate::templates::{ChangeStatus, FileChange};
use colored::{ColoredString, Colorize};
use std::path::Path;

/// Print one yeoman-style status line per file
pub fn print_changes(changes: &[FileChange]) {
    for change in changes {
        println!("{} {}", styled_status(change.status), display_path(&change.path));
    }
}

/// Warn about dependencies that were left at a newer existing version
pub fn print_kept_dependencies(kept: &[KeptDependency]) {
    for dep in kept {
        eprintln!(
            "{} keeping {}@{} (requested {})",
            "Warning:".yellow(),
            dep.name,
            dep.existing,
            dep.requested
        );
    }
}

/// Path relative to the working directory when possible
pub fn display_path(path: &Path) -> String {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf))
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}

fn styled_status(status: ChangeStatus) -> ColoredString {
    let label = format!("{:>10}", status.label());
    match status {
        ChangeStatus::Created => label.green(),
        ChangeStatus::Overwritten => label.yellow(),
        ChangeStatus::Identical => label.cyan(),
        ChangeStatus::Updated | ChangeStatus::Appended => label.blue(),
        ChangeStatus::Skipped => label.dimmed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_path_relative_to_cwd() {
        let cwd = std::env::current_dir().unwrap();
        let path = cwd.join("src").join("index.js");
        assert_eq!(
            display_path(&path),
            Path::new("src").join("index.js").display().to_string()
        );
    }

    #[test]
    fn test_display_path_outside_cwd_unchanged() {
        let path = Path::new("/definitely/elsewhere.txt");
        assert_eq!(display_path(path), "/definitely/elsewhere.txt");
    }

    #[test]
    fn test_status_labels_are_padded() {
        colored::control::set_override(false);
        assert_eq!(styled_status(ChangeStatus::Created).to_string(), "    create");
        colored::control::unset_override();
    }
}

//! Commented placeholder blocks for the project's `.env`

use super::{ProjectContext, DOTENV};
use crate::templates::{ChangeStatus, FileChange};
use anyhow::{Context, Result};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

/// Append a `## label` line and one `#KEY=` line per key to `.env`.
///
/// The block is skipped when every key is already declared in the file,
/// commented out or not, so running a generator twice does not repeat it.
pub async fn append_stub_vars_to_dotenv(
    project: &ProjectContext,
    label: &str,
    keys: &[&str],
) -> Result<FileChange> {
    let path = project.path(DOTENV);

    let existing = match fs::read_to_string(&path).await {
        Ok(content) => Some(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => return Err(e).with_context(|| format!("Failed to read {}", path.display())),
    };

    if let Some(content) = &existing {
        if keys.iter().all(|key| declares(content, key)) {
            return Ok(FileChange::new(path, ChangeStatus::Skipped));
        }
    }

    let mut block = String::new();
    if existing
        .as_deref()
        .is_some_and(|content| !content.is_empty() && !content.ends_with('\n'))
    {
        block.push('\n');
    }
    block.push_str(&stub_block(label, keys));

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .await
        .with_context(|| format!("Failed to open {}", path.display()))?;
    file.write_all(block.as_bytes())
        .await
        .with_context(|| format!("Failed to append to {}", path.display()))?;
    file.flush().await?;

    let status = if existing.is_some() {
        ChangeStatus::Appended
    } else {
        ChangeStatus::Created
    };
    Ok(FileChange::new(path, status))
}

fn stub_block(label: &str, keys: &[&str]) -> String {
    let mut block = format!("## {}\n", label);
    for key in keys {
        block.push_str(&format!("#{}=\n", key));
    }
    block
}

/// Whether `content` assigns `key`, either live or commented out
fn declares(content: &str, key: &str) -> bool {
    content.lines().any(|line| {
        let line = line.trim_start().trim_start_matches('#').trim_start();
        line.strip_prefix(key)
            .is_some_and(|rest| rest.trim_start().starts_with('='))
    })
}

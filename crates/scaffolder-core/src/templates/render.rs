//! Placeholder substitution for template contents and paths
//!
//! Templates use EJS-style output tags: `<%= name %>` or `<%- name %>`.
//! Only plain variable lookups are supported; anything else is left untouched.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

const TAG_OPEN: &str = "<%";
const TAG_CLOSE: &str = "%>";

/// Placeholder name to value mapping used when rendering templates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateContext {
    values: BTreeMap<String, String>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value, returning the context for chaining
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

/// Render a template string against a context.
///
/// Unknown names and unterminated tags are copied through as literal text.
pub fn render(template: &str, context: &TemplateContext) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(TAG_OPEN) {
        output.push_str(&rest[..start]);
        let tag = &rest[start..];

        let Some(end) = tag[TAG_OPEN.len()..]
            .find(TAG_CLOSE)
            .map(|i| i + TAG_OPEN.len())
        else {
            // Unterminated tag, keep the remainder verbatim
            output.push_str(tag);
            return output;
        };

        let whole = &tag[..end + TAG_CLOSE.len()];
        let inner = &tag[TAG_OPEN.len()..end];

        match lookup(inner, context) {
            Some(value) => output.push_str(value),
            None => output.push_str(whole),
        }

        rest = &tag[end + TAG_CLOSE.len()..];
    }

    output.push_str(rest);
    output
}

/// Resolve the body of a `<%= ... %>` / `<%- ... %>` tag
fn lookup<'a>(inner: &str, context: &'a TemplateContext) -> Option<&'a str> {
    let name = inner
        .strip_prefix('=')
        .or_else(|| inner.strip_prefix('-'))?
        .trim();
    context.get(name)
}

/// Render every segment of a relative template path.
///
/// The result is always relative: separators inside a rendered value split it
/// into further segments, and root, prefix, `.` and `..` components are dropped.
pub fn render_path(path: &str, context: &TemplateContext) -> PathBuf {
    let mut rendered = PathBuf::new();
    for segment in path.split('/') {
        let value = render(segment, context);
        for part in value.split(['/', '\\']) {
            for component in Path::new(part).components() {
                if let Component::Normal(name) = component {
                    rendered.push(name);
                }
            }
        }
    }
    rendered
}

/// Join the components of a path with `/`, whatever the host separator is
pub fn to_posix(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Path of `to` relative to the directory `from` (both relative to the same root)
pub fn relative_path(from: &Path, to: &Path) -> PathBuf {
    let from: Vec<_> = from
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    let to: Vec<_> = to
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();

    let mut relative = PathBuf::new();
    for _ in common..from.len() {
        relative.push("..");
    }
    for component in &to[common..] {
        relative.push(component.as_os_str());
    }
    relative
}

//! Extension generator: adds the AEM SPA extension point to an App Builder project
//!
//! Runs in two phases. `initializing` computes where the extension lives and
//! reads the project name; `writing` registers the extension, writes its config,
//! copies the web sources, merges dependencies and stubs out `.env`.

use crate::project::dependencies::KeptDependency;
use crate::project::{
    add_dependencies, append_stub_vars_to_dotenv, write_key_app_config, write_key_yaml_config,
    ProjectContext,
};
use crate::templates::{
    copy_template, relative_path, to_posix, FileChange, TemplateContext, TemplateFetcher,
    TemplateKind,
};
use anyhow::{Context, Result};
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};

/// Extension point key registered under `extensions` in `app.config.yaml`
pub const CONFIG_NAME: &str = "aem/spa/1";

/// Runtime packages the generated web app imports
pub const RUNTIME_DEPENDENCIES: &[(&str, &str)] = &[
    ("@adobe/aem-headless-client-js", "^3.0.0"),
    ("@adobe/aio-sdk", "^3.0.0"),
    ("core-js", "^3.6.4"),
    ("react", "^16.13.1"),
    ("react-dom", "^16.13.1"),
    ("react-router-dom", "^6.3.0"),
    ("regenerator-runtime", "^0.13.5"),
];

/// Build tooling for the web app
pub const DEV_DEPENDENCIES: &[(&str, &str)] = &[
    ("@babel/core", "^7.8.7"),
    ("@babel/plugin-transform-react-jsx", "^7.8.3"),
    ("@babel/polyfill", "^7.8.7"),
    ("@babel/preset-env", "^7.8.7"),
];

/// `.env` placeholder blocks, in the order they are appended
pub const DOTENV_STUBS: &[(&str, &[&str])] = &[
    (
        "AEM host URI, e.g. https://author-p1234-e5678.adobeaemcloud.com",
        &["AEM_HOST_URI"],
    ),
    (
        "AEM GraphQL endpoint, e.g. /content/_cq_graphql/wknd/endpoint.json",
        &["AEM_GRAPHQL_ENDPOINT"],
    ),
    (
        "AEM auth method: basic, dev-token or service-token",
        &["AEM_AUTH_METHOD"],
    ),
    ("AEM basic auth credentials", &["AEM_AUTH_USER", "AEM_AUTH_PASS"]),
    ("AEM developer token", &["AEM_DEV_TOKEN"]),
    ("Path to the AEM service token JSON file", &["AEM_SERVICE_TOKEN"]),
];

/// Where the extension lives inside the project, relative to the project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionDescriptor {
    pub ext_folder: PathBuf,
    pub web_src_folder: PathBuf,
    pub ext_config_path: PathBuf,
    pub config_name: String,
}

impl Default for ExtensionDescriptor {
    fn default() -> Self {
        let ext_folder = Path::new("src").join("aem-spa-1");
        Self {
            web_src_folder: ext_folder.join("web-src"),
            ext_config_path: ext_folder.join("ext.config.yaml"),
            ext_folder,
            config_name: CONFIG_NAME.to_string(),
        }
    }
}

impl ExtensionDescriptor {
    /// Key path of the extension entry in `app.config.yaml`
    pub fn app_config_key(&self) -> String {
        format!("extensions.{}", self.config_name)
    }

    /// `$include` target, always `/`-separated
    pub fn include_path(&self) -> String {
        to_posix(&self.ext_config_path)
    }

    /// Web sources as seen from the directory holding `ext.config.yaml`
    pub fn web_path(&self) -> String {
        let config_dir = self.ext_config_path.parent().unwrap_or(Path::new(""));
        to_posix(&relative_path(config_dir, &self.web_src_folder))
    }
}

#[derive(Debug, Serialize)]
struct Operations {
    view: Vec<Operation>,
}

#[derive(Debug, Serialize)]
struct Operation {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(rename = "impl")]
    implementation: &'static str,
}

/// Files touched by an extension run, plus dependencies left at their existing version
#[derive(Debug, Clone, Default)]
pub struct ExtensionRun {
    pub changes: Vec<FileChange>,
    pub kept_dependencies: Vec<KeptDependency>,
}

/// State computed by `initializing` and consumed by `writing`
#[derive(Debug)]
struct Initialized {
    descriptor: ExtensionDescriptor,
    context: TemplateContext,
}

/// Run the extension generator against an existing project
pub async fn run(
    project: &ProjectContext,
    fetcher: &mut TemplateFetcher,
) -> Result<ExtensionRun> {
    let state = initializing(project).await?;
    writing(project, &state, fetcher).await
}

async fn initializing(project: &ProjectContext) -> Result<Initialized> {
    let project_name = project.project_name().await?;
    Ok(Initialized {
        descriptor: ExtensionDescriptor::default(),
        context: TemplateContext::new().with("projectName", project_name),
    })
}

async fn writing(
    project: &ProjectContext,
    state: &Initialized,
    fetcher: &mut TemplateFetcher,
) -> Result<ExtensionRun> {
    let descriptor = &state.descriptor;
    let ext_config = project.path(&descriptor.ext_config_path);
    let mut result = ExtensionRun::default();

    // 1. register the extension in app.config.yaml
    let mut include = Mapping::new();
    include.insert("$include".into(), descriptor.include_path().into());
    result.changes.push(
        write_key_app_config(project, &descriptor.app_config_key(), Value::Mapping(include))
            .await?,
    );

    // 2. the extension serves a single web view
    let operations = serde_yaml::to_value(Operations {
        view: vec![Operation {
            kind: "web",
            implementation: "index.html",
        }],
    })
    .context("Failed to serialize extension operations")?;
    result
        .changes
        .push(write_key_yaml_config(&ext_config, "operations", operations).await?);

    // 3. web path, relative to ext.config.yaml
    result.changes.push(
        write_key_yaml_config(&ext_config, "web", descriptor.web_path().into()).await?,
    );

    // 4. copy the web sources
    let tree = fetcher.fetch_tree(TemplateKind::SpaWebSrc).await?;
    let copied = copy_template(tree, &project.path(&descriptor.web_src_folder), &state.context)
        .await?;
    result.changes.extend(copied);

    // 5. dependencies
    for (deps, dev) in [(RUNTIME_DEPENDENCIES, false), (DEV_DEPENDENCIES, true)] {
        let merge = add_dependencies(project, deps, dev).await?;
        result.changes.push(merge.change);
        result.kept_dependencies.extend(merge.kept);
    }

    // 6. .env placeholders
    for (label, keys) in DOTENV_STUBS {
        result
            .changes
            .push(append_stub_vars_to_dotenv(project, label, keys).await?);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_paths() {
        let descriptor = ExtensionDescriptor::default();
        assert_eq!(descriptor.app_config_key(), "extensions.aem/spa/1");
        assert_eq!(descriptor.include_path(), "src/aem-spa-1/ext.config.yaml");
        assert_eq!(descriptor.web_path(), "web-src");
    }

    #[cfg(windows)]
    #[test]
    fn test_include_path_is_posix_for_backslash_paths() {
        let descriptor = ExtensionDescriptor {
            ext_config_path: PathBuf::from(r"src\aem-spa-1\ext.config.yaml"),
            web_src_folder: PathBuf::from(r"src\aem-spa-1\web-src"),
            ..ExtensionDescriptor::default()
        };
        assert!(!descriptor.include_path().contains('\\'));
        assert_eq!(descriptor.include_path(), "src/aem-spa-1/ext.config.yaml");
        assert_eq!(descriptor.web_path(), "web-src");
    }

    #[test]
    fn test_operations_shape() {
        let value = serde_yaml::to_value(Operations {
            view: vec![Operation {
                kind: "web",
                implementation: "index.html",
            }],
        })
        .unwrap();
        let expected: Value =
            serde_yaml::from_str("view:\n  - type: web\n    impl: index.html\n").unwrap();
        assert_eq!(value, expected);
    }

    #[test]
    fn test_six_dotenv_blocks() {
        assert_eq!(DOTENV_STUBS.len(), 6);
        assert_eq!(DOTENV_STUBS[3].1, &["AEM_AUTH_USER", "AEM_AUTH_PASS"]);
    }
}

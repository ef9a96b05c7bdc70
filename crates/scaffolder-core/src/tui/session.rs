//! Charm-style CLI output using cliclack

use crate::generators::{app, extension};
use crate::project::dependencies::KeptDependency;
use crate::project::ProjectContext;
use crate::report::display_path;
use crate::templates::{ChangeStatus, FileChange, TemplateFetcher, TemplateSource};
use anyhow::Result;
use std::path::Path;

/// Run the project generator with cliclack output
pub async fn run_app(
    options: &app::GeneratorOptions,
    fetcher: &mut TemplateFetcher,
) -> Result<()> {
    cliclack::intro("AEM SPA project")?;
    log_source(fetcher.source())?;

    let spinner = cliclack::spinner();
    spinner.start("Creating project...");

    let changes = match app::run(options, fetcher).await {
        Ok(changes) => changes,
        Err(e) => {
            spinner.stop("Failed to create project");
            return Err(e);
        }
    };

    spinner.stop(format!(
        "Wrote {} files in {}",
        written(&changes),
        options.dest_folder.display()
    ));
    log_changes(&changes)?;

    let mut steps = Vec::new();
    if options.dest_folder != Path::new(".") {
        steps.push(format!("cd {}", options.dest_folder.display()));
    }
    steps.push("npm install".to_string());
    print_next_steps(&steps)
}

/// Run the extension generator with cliclack output
pub async fn run_extension(
    project: &ProjectContext,
    fetcher: &mut TemplateFetcher,
) -> Result<()> {
    cliclack::intro("AEM SPA extension")?;
    log_source(fetcher.source())?;

    let spinner = cliclack::spinner();
    spinner.start("Adding extension...");

    let outcome = match extension::run(project, fetcher).await {
        Ok(outcome) => outcome,
        Err(e) => {
            spinner.stop("Failed to add extension");
            return Err(e);
        }
    };

    spinner.stop(format!(
        "Registered {} in {}",
        extension::CONFIG_NAME,
        project.root().display()
    ));
    log_changes(&outcome.changes)?;
    log_kept_dependencies(&outcome.kept_dependencies)?;

    print_next_steps(&[
        "Fill in the AEM_* variables in .env".to_string(),
        "npm install".to_string(),
        "aio app run".to_string(),
    ])
}

fn log_source(source: &TemplateSource) -> Result<()> {
    match source {
        TemplateSource::Local(path) => {
            cliclack::log::info(format!("Using local templates from {}", path.display()))?
        }
        TemplateSource::Embedded => cliclack::log::info("Using built-in templates")?,
    }
    Ok(())
}

fn log_changes(changes: &[FileChange]) -> Result<()> {
    for change in changes {
        let line = format!("{} {}", change.status, display_path(&change.path));
        match change.status {
            ChangeStatus::Created => cliclack::log::success(line)?,
            ChangeStatus::Overwritten => cliclack::log::warning(line)?,
            ChangeStatus::Updated | ChangeStatus::Appended => cliclack::log::step(line)?,
            ChangeStatus::Identical | ChangeStatus::Skipped => cliclack::log::remark(line)?,
        }
    }
    Ok(())
}

fn log_kept_dependencies(kept: &[KeptDependency]) -> Result<()> {
    for dep in kept {
        cliclack::log::warning(format!(
            "Keeping {}@{} (requested {})",
            dep.name, dep.existing, dep.requested
        ))?;
    }
    Ok(())
}

fn written(changes: &[FileChange]) -> usize {
    changes.iter().filter(|c| c.status.is_write()).count()
}

fn print_next_steps(steps: &[String]) -> Result<()> {
    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}

//! AEM SPA tools - Project and extension scaffolding for App Builder

use anyhow::Result;
use clap::{Args as ClapArgs, CommandFactory, Parser, Subcommand};
use scaffolder_core::generators::app::DEFAULT_PROJECT_NAME;
use scaffolder_core::generators::{app, extension};
use scaffolder_core::{report, GeneratorOptions, ProjectContext, TemplateFetcher, TemplateSource};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "aem-spa-tools")]
#[command(about = "CLI for scaffolding AEM SPA projects and App Builder extensions")]
#[command(version)]
pub struct Args {
    /// Print plain status lines instead of interactive output
    #[arg(long, global = true)]
    pub plain: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project from the starter template
    App(AppArgs),
    /// Add the AEM SPA extension to the project in the current directory
    Ext(TemplateArgs),
}

#[derive(ClapArgs, Debug)]
pub struct AppArgs {
    /// Folder the project is written into
    #[arg(long = "dest-folder", default_value = ".")]
    pub dest_folder: PathBuf,

    /// Project name rendered into the templates
    #[arg(long = "project-name", default_value = DEFAULT_PROJECT_NAME)]
    pub project_name: String,

    #[command(flatten)]
    pub templates: TemplateArgs,
}

#[derive(ClapArgs, Debug)]
pub struct TemplateArgs {
    /// Local directory to use for templates instead of the built-in ones (for development use)
    #[arg(long = "template-dir", env = scaffolder_core::TEMPLATE_DIR_ENV)]
    pub template_dir: Option<PathBuf>,
}

impl TemplateArgs {
    fn fetcher(&self) -> TemplateFetcher {
        TemplateFetcher::new(TemplateSource::from_dir(self.template_dir.clone()))
    }
}

async fn run_app(args: AppArgs, plain: bool) -> Result<()> {
    let options = GeneratorOptions::new(args.dest_folder, args.project_name);
    let mut fetcher = args.templates.fetcher();

    if plain {
        let changes = app::run(&options, &mut fetcher).await?;
        report::print_changes(&changes);
        Ok(())
    } else {
        scaffolder_core::tui::run_app(&options, &mut fetcher).await
    }
}

async fn run_ext(args: TemplateArgs, plain: bool) -> Result<()> {
    let project = ProjectContext::current_dir()?;
    let mut fetcher = args.fetcher();

    if plain {
        let outcome = extension::run(&project, &mut fetcher).await?;
        report::print_changes(&outcome.changes);
        report::print_kept_dependencies(&outcome.kept_dependencies);
        Ok(())
    } else {
        scaffolder_core::tui::run_extension(&project, &mut fetcher).await
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();

    let result = match args.command {
        Some(Command::App(app_args)) => run_app(app_args, args.plain).await,
        Some(Command::Ext(template_args)) => run_ext(template_args, args.plain).await,
        None => Args::command().print_help().map_err(Into::into),
    };

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_defaults() {
        let args = Args::try_parse_from(["aem-spa-tools", "app"]).unwrap();
        let Some(Command::App(app_args)) = args.command else {
            panic!("expected app subcommand");
        };
        assert_eq!(app_args.dest_folder, PathBuf::from("."));
        assert_eq!(app_args.project_name, "project-name-not-set");
        assert!(!args.plain);
    }

    #[test]
    fn test_app_options() {
        let args = Args::try_parse_from([
            "aem-spa-tools",
            "app",
            "--dest-folder",
            "out",
            "--project-name",
            "my-app",
            "--plain",
        ])
        .unwrap();
        assert!(args.plain);
        let Some(Command::App(app_args)) = args.command else {
            panic!("expected app subcommand");
        };
        assert_eq!(app_args.dest_folder, PathBuf::from("out"));
        assert_eq!(app_args.project_name, "my-app");
    }

    #[test]
    fn test_ext_takes_no_generator_options() {
        assert!(Args::try_parse_from(["aem-spa-tools", "ext", "--project-name", "x"]).is_err());
        assert!(Args::try_parse_from(["aem-spa-tools", "ext"]).is_ok());
    }

    #[test]
    fn test_cli_is_well_formed() {
        Args::command().debug_assert();
    }
}

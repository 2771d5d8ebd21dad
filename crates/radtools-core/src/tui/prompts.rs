//! `init` flow with cliclack progress output
//!
//! Progress goes to stderr through cliclack; the install summary and next
//! steps go to stdout so they survive redirection.

use crate::exit_code;
use crate::install::{self, Action, FileOperation, InstallReport, Outcome, PlanOptions};
use crate::project::ProjectTarget;
use crate::runtime::{self, DependencyInstaller};
use crate::templates::{version, TemplateSet, TemplateSource};
use crate::UPGRADE_COMMAND;
use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

/// Arguments for the init command
#[derive(Debug, Clone, Default)]
pub struct InitArgs {
    /// Project root; the current directory when absent
    pub directory: Option<PathBuf>,

    /// Local template directory used instead of the bundled templates
    pub template_dir: Option<PathBuf>,

    /// Overwrite existing components, hooks, and API routes
    pub force: bool,

    /// Print the plan without writing anything
    pub dry_run: bool,

    /// Add template dependencies with the detected package manager
    pub install: bool,
}

/// Run `init` and return the process exit code
pub async fn run(args: InitArgs, cli_version: &str) -> Result<u8> {
    cliclack::intro("radtools init")?;

    // Step 1: Inspect the target project
    let target = ProjectTarget::inspect(&resolve_directory(&args));
    cliclack::log::info(format!("Project: {}", target.root.display()))?;
    if let Some(router) = target.router {
        cliclack::log::info(format!("Router: {}", router))?;
    }

    // Step 2: Load templates
    let source = TemplateSource::resolve(args.template_dir.clone());
    let templates = match load_templates(&source, cli_version) {
        Ok(templates) => templates,
        Err(e) => {
            cliclack::log::error(format!("{:#}", e))?;
            cliclack::outro_cancel("Installation aborted, nothing was written")?;
            return Ok(exit_code::ABORTED);
        }
    };

    // Step 3: Plan
    let options = PlanOptions { force: args.force };
    let operations = match install::plan(&target, &templates, &options) {
        Ok(operations) => operations,
        Err(e) => {
            cliclack::log::error(e.to_string())?;
            cliclack::outro_cancel("Installation aborted, nothing was written")?;
            return Ok(exit_code::ABORTED);
        }
    };

    // Only probe for lockfiles once the project is known to exist
    let manager = runtime::detect(&target.root);
    cliclack::log::info(format!("Package manager: {}", manager))?;

    if !target.has_tailwind_config {
        cliclack::log::warning("No tailwind.config found; components are styled with Tailwind classes")?;
    }

    if args.dry_run {
        print_plan(&operations);
        cliclack::outro("Dry run: no files were written")?;
        return Ok(exit_code::SUCCESS);
    }

    // Step 4: Apply
    let report = install::apply(operations);

    // Step 5: Report
    print_summary(&report);

    if let Some(reason) = report.aborted() {
        cliclack::outro_cancel(format!("Installation aborted: {}", reason))?;
        return Ok(exit_code::ABORTED);
    }

    if !report.is_success() {
        cliclack::outro_cancel(format!(
            "Installation finished with {} failed file(s)",
            report.summary().failed
        ))?;
        return Ok(exit_code::FAILED);
    }

    // Step 6: Dependencies
    let installer = DependencyInstaller::new(manager, &target.root, templates.dependencies.clone());
    if args.install {
        if let Err(e) = installer.install().await {
            cliclack::log::error(e.to_string())?;
            cliclack::outro_cancel(format!("Run `{}` to finish setup", installer.command_line()))?;
            return Ok(exit_code::FAILED);
        }
        cliclack::log::success("Dependencies installed")?;
    }

    print_next_steps(&installer, args.install);
    cliclack::outro("Happy hacking!")?;

    Ok(exit_code::SUCCESS)
}

fn resolve_directory(args: &InitArgs) -> PathBuf {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    match &args.directory {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => current_dir.join(dir),
        None => current_dir,
    }
}

fn load_templates(source: &TemplateSource, cli_version: &str) -> Result<TemplateSet> {
    if let TemplateSource::Local(dir) = source {
        cliclack::log::info(format!("Using local templates from {}", dir.display()))?;
    }

    let templates = source.load()?;

    if source.is_local() {
        if let Some(warning) =
            version::check_compatibility(cli_version, &templates.version, UPGRADE_COMMAND)
        {
            cliclack::log::warning(format!(
                "Version warning: {}",
                warning.lines().next().unwrap_or(&warning)
            ))?;
        }
    }

    Ok(templates)
}

fn action_label(action: &Action) -> &'static str {
    match action {
        Action::Create => "created",
        Action::Overwrite => "updated",
        Action::Merge(_) => "merged",
        Action::SkipExists => "skipped",
    }
}

fn print_plan(operations: &[FileOperation]) {
    println!();
    println!("  Planned changes");
    println!();

    for op in operations {
        let action = format!("{:<9}", op.action.to_string());
        let action = match op.action {
            Action::SkipExists => action.dimmed(),
            Action::Merge(_) => action.yellow(),
            _ => action.green(),
        };
        match &op.action {
            Action::Merge(strategy) => {
                println!("  {} {} ({})", action, op.relative.display(), strategy)
            }
            _ => println!("  {} {}", action, op.relative.display()),
        }
    }
    println!();
}

fn print_summary(report: &InstallReport) {
    println!();
    for entry in report.entries() {
        let path = entry.operation.relative.display();
        match &entry.outcome {
            Outcome::Applied => println!(
                "  {} {}",
                format!("{:<9}", action_label(&entry.operation.action)).green(),
                path
            ),
            Outcome::Skipped => println!("  {} {}", format!("{:<9}", "skipped").dimmed(), path),
            Outcome::Failed(_) => println!("  {} {}", format!("{:<9}", "failed").red(), path),
        }
    }

    let summary = report.summary();
    let failed = format!("{} failed", summary.failed);
    println!();
    println!(
        "  {}, {}, {}",
        format!("{} applied", summary.applied).green(),
        format!("{} skipped", summary.skipped).dimmed(),
        if summary.failed > 0 { failed.red() } else { failed.normal() }
    );

    if summary.failed > 0 {
        println!();
        println!("  Failures");
        println!();
        for entry in report.failures() {
            if let Some(err) = entry.error() {
                println!("  - {}: {}", entry.operation.relative.display(), err);
            }
        }
    }
    println!();
}

fn print_next_steps(installer: &DependencyInstaller, installed: bool) {
    let mut steps = Vec::new();
    if !installed && !installer.packages().is_empty() {
        steps.push(installer.command_line());
    }
    steps.push(format!("{} run dev", installer.manager()));
    steps.push("Open the Devtools button in the bottom-right corner of your app".to_string());

    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }
    println!();
}

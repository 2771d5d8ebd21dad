//! RadTools Core - installs the RadTools devtools overlay and UI components
//! into a Next.js + Tailwind project.
//!
//! # Architecture
//!
//! An `init` run moves through four stages:
//!
//! - **Detect** - [`ProjectTarget::inspect`] and [`runtime::detect`] describe the target
//!   project and its package manager
//! - **Plan** - [`install::plan`] decides create / overwrite / skip / merge per template file
//! - **Execute** - [`install::apply`] performs the plan and collects an [`InstallReport`]
//! - **Report** - the `tui` flow prints the summary and picks the exit code
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based terminal flow
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use radtools_core::{install, runtime, ProjectTarget, TemplateSource};
//!
//! let target = ProjectTarget::inspect(Path::new("."));
//! let manager = runtime::detect(&target.root);
//! let templates = TemplateSource::Bundled.load()?;
//! let operations = install::plan(&target, &templates, &install::PlanOptions::default())?;
//! let report = install::apply(operations);
//! ```

pub mod error;
pub mod install;
pub mod project;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use error::InstallError;
pub use install::{apply, plan, Action, FileOperation, InstallReport, Outcome, PlanOptions};
pub use project::{ProjectTarget, Router};
pub use runtime::{detect, DependencyInstaller, PackageManager};
pub use templates::{TemplateFile, TemplateKind, TemplateSet, TemplateSource};

#[cfg(feature = "tui")]
pub use tui::run;

/// Process exit codes shared by the CLI
pub mod exit_code {
    /// Success, or an informational command
    pub const SUCCESS: u8 = 0;
    /// Unknown command or invalid arguments
    pub const USAGE: u8 = 1;
    /// The run finished but at least one operation (or dependency install) failed
    pub const FAILED: u8 = 2;
    /// The run stopped before or during execution
    pub const ABORTED: u8 = 3;
}

/// Command shown when templates need a newer CLI
pub const UPGRADE_COMMAND: &str = "cargo install radtools --force";

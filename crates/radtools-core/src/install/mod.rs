//! Installation planning and execution
//!
//! `plan` turns a template set into file operations against a [`ProjectTarget`];
//! `apply` performs them and collects an [`InstallReport`].
//!
//! [`ProjectTarget`]: crate::project::ProjectTarget

pub mod execute;
pub mod merge;
pub mod plan;
pub mod report;

pub use execute::apply;
pub use plan::{plan, Action, FileOperation, PlanOptions};
pub use report::{InstallReport, Outcome, ReportEntry, Summary};

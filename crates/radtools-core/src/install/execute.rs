//! Installation executor
//!
//! Applies planned operations in order. A failing operation is recorded and the
//! run continues, except when the run's first directory creation fails: that
//! usually means the project tree is not writable, so the run stops there.

use crate::error::{InstallError, Result};
use crate::install::merge;
use crate::install::plan::{Action, FileOperation};
use crate::install::report::{InstallReport, Outcome};
use crate::templates::MergeStrategy;
use std::fs;
use std::path::Path;

/// Apply `operations` in order and report every outcome
pub fn apply(operations: Vec<FileOperation>) -> InstallReport {
    let mut report = InstallReport::default();
    let mut dir_step_taken = false;

    for operation in operations {
        let action = operation.action.clone();
        let result = match action {
            Action::SkipExists => {
                tracing::debug!(path = %operation.relative.display(), "skipped");
                report.record(operation, Outcome::Skipped);
                continue;
            }
            Action::Merge(strategy) => merge_file(&operation, &strategy),
            Action::Create | Action::Overwrite => {
                let first_dir_step = !dir_step_taken;
                dir_step_taken = true;
                match ensure_parent_dir(&operation.destination) {
                    Ok(()) => write_file(&operation.destination, &operation.content),
                    Err(err) if first_dir_step => {
                        tracing::warn!(error = %err, "first directory creation failed, aborting");
                        report.abort(err.to_string());
                        report.record(operation, Outcome::Failed(err));
                        break;
                    }
                    Err(err) => Err(err),
                }
            }
        };

        match result {
            Ok(()) => {
                tracing::debug!(path = %operation.relative.display(), "applied");
                report.record(operation, Outcome::Applied);
            }
            Err(err) => {
                tracing::warn!(path = %operation.relative.display(), error = %err, "failed");
                report.record(operation, Outcome::Failed(err));
            }
        }
    }

    report
}

/// Create the destination's parent directories; succeeds if they exist
fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) => fs::create_dir_all(parent)
            .map_err(|e| InstallError::fs("failed to create directory", parent, e)),
        None => Ok(()),
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| InstallError::fs("failed to write", path, e))
}

/// Merge into the existing destination. Nothing is written unless the merge succeeds.
fn merge_file(operation: &FileOperation, strategy: &MergeStrategy) -> Result<()> {
    let path = &operation.destination;
    match strategy {
        MergeStrategy::Replace => write_file(path, &operation.content),
        MergeStrategy::WrapProvider {
            import,
            anchor,
            provider,
        } => {
            let existing = fs::read_to_string(path)
                .map_err(|e| InstallError::fs("failed to read", path, e))?;
            let merged =
                merge::wrap_provider(&existing, &operation.relative, import, anchor, provider)?;
            write_file(path, &merged)
        }
    }
}

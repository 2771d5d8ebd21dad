//! Install report: the per-file outcome of a run

use crate::error::InstallError;
use crate::install::plan::FileOperation;

/// Result of applying one operation
#[derive(Debug)]
pub enum Outcome {
    Applied,
    Skipped,
    Failed(InstallError),
}

#[derive(Debug)]
pub struct ReportEntry {
    pub operation: FileOperation,
    pub outcome: Outcome,
}

impl ReportEntry {
    pub fn error(&self) -> Option<&InstallError> {
        match &self.outcome {
            Outcome::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Outcome counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub applied: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Ordered outcomes of an install run, in execution order
#[derive(Debug, Default)]
pub struct InstallReport {
    entries: Vec<ReportEntry>,
    aborted: Option<String>,
}

impl InstallReport {
    pub(crate) fn record(&mut self, operation: FileOperation, outcome: Outcome) {
        debug_assert!(
            !self
                .entries
                .iter()
                .any(|e| e.operation.destination == operation.destination),
            "destination recorded twice: {}",
            operation.destination.display()
        );
        self.entries.push(ReportEntry { operation, outcome });
    }

    pub(crate) fn abort(&mut self, reason: String) {
        self.aborted = Some(reason);
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// Reason the run stopped early, if it did
    pub fn aborted(&self) -> Option<&str> {
        self.aborted.as_deref()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(|e| e.error().is_some())
    }

    pub fn summary(&self) -> Summary {
        self.entries
            .iter()
            .fold(Summary::default(), |mut summary, entry| {
                match entry.outcome {
                    Outcome::Applied => summary.applied += 1,
                    Outcome::Skipped => summary.skipped += 1,
                    Outcome::Failed(_) => summary.failed += 1,
                }
                summary
            })
    }

    /// No failed operations and no abort
    pub fn is_success(&self) -> bool {
        self.aborted.is_none() && self.failures().next().is_none()
    }
}

//! Error types for installer operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while inspecting, planning, or applying an installation
#[derive(Error, Debug)]
pub enum InstallError {
    /// Target does not look like a supported Next.js project. Fatal, raised before any write.
    #[error("{path} is not a supported Next.js project: {reason}")]
    EnvironmentMismatch { path: PathBuf, reason: String },

    /// A structural merge could not locate its insertion point
    #[error("could not merge into {path}: anchor `{anchor}` not found")]
    MergeAnchorNotFound { path: PathBuf, anchor: String },

    #[error("{action} {path}: {source}")]
    FileSystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid template manifest {path}: {reason}")]
    InvalidManifest { path: PathBuf, reason: String },

    #[error("templates '{first}' and '{second}' both target {destination}")]
    DuplicateDestination {
        destination: PathBuf,
        first: String,
        second: String,
    },

    #[error("dependency installation failed: {0}")]
    DependencyInstall(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}

impl InstallError {
    pub(crate) fn fs(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        InstallError::FileSystem {
            action,
            path: path.into(),
            source,
        }
    }

    /// Whether this error stops the whole run rather than a single file
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            InstallError::EnvironmentMismatch { .. }
                | InstallError::InvalidManifest { .. }
                | InstallError::DuplicateDestination { .. }
                | InstallError::UnknownCommand(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, InstallError>;

//! Package manager detection and dependency installation
//!
//! This module provides:
//! - Lockfile-based package manager detection
//! - Running the detected package manager to add template dependencies

pub mod install;
pub mod package_manager;

pub use install::DependencyInstaller;
pub use package_manager::{detect, PackageManager};

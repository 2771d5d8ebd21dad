//! Package manager detection for npm, yarn, pnpm, and Bun

use std::fmt;
use std::path::Path;

/// Supported package managers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
    Bun,
}

/// Lockfiles in detection priority order. The first match wins.
const LOCKFILES: &[(&str, PackageManager)] = &[
    ("bun.lockb", PackageManager::Bun),
    ("bun.lock", PackageManager::Bun),
    ("pnpm-lock.yaml", PackageManager::Pnpm),
    ("yarn.lock", PackageManager::Yarn),
];

impl PackageManager {
    /// Binary name, also used for display
    pub fn name(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Bun => "bun",
        }
    }

    /// Subcommand that adds packages to the project
    pub fn add_subcommand(&self) -> &'static str {
        match self {
            PackageManager::Npm => "install",
            PackageManager::Yarn | PackageManager::Pnpm | PackageManager::Bun => "add",
        }
    }

    /// Full command line for adding the given packages
    pub fn add_command(&self, packages: &[String]) -> String {
        let mut cmd = format!("{} {}", self.name(), self.add_subcommand());
        for package in packages {
            cmd.push(' ');
            cmd.push_str(package);
        }
        cmd
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Detect the package manager managing `project_root` from its lockfiles.
///
/// Never fails: a directory without any known lockfile is an npm project.
pub fn detect(project_root: &Path) -> PackageManager {
    for (lockfile, manager) in LOCKFILES {
        if project_root.join(lockfile).is_file() {
            tracing::debug!(lockfile, manager = manager.name(), "detected package manager");
            return *manager;
        }
    }
    tracing::debug!("no lockfile found, defaulting to npm");
    PackageManager::Npm
}

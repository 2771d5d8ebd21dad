//! Target project inspection
//!
//! Builds a read-only [`ProjectTarget`] describing the directory `init` runs against:
//! where sources live, which Next.js router is in use, whether Tailwind is configured,
//! and where the global stylesheet is.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directories never searched for the global stylesheet
const SKIP_DIRS: &[&str] = &["node_modules", ".next", ".git", "out", "dist"];

const TAILWIND_CONFIGS: &[&str] = &[
    "tailwind.config.js",
    "tailwind.config.cjs",
    "tailwind.config.mjs",
    "tailwind.config.ts",
];

const GLOBALS_CSS: &str = "globals.css";

/// Next.js routing convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Router {
    App,
    Pages,
}

impl Router {
    pub fn dir_name(&self) -> &'static str {
        match self {
            Router::App => "app",
            Router::Pages => "pages",
        }
    }
}

impl fmt::Display for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/", self.dir_name())
    }
}

/// The destination project of an install run
#[derive(Debug, Clone)]
pub struct ProjectTarget {
    /// Absolute project root
    pub root: PathBuf,
    pub exists: bool,
    /// Directory template paths are resolved against: the root, or `root/src`
    pub source_root: PathBuf,
    /// Router in use; `None` when neither `app/` nor `pages/` exists
    pub router: Option<Router>,
    pub has_tailwind_config: bool,
    /// Global stylesheet, relative to the project root
    pub globals_css: PathBuf,
}

impl ProjectTarget {
    /// Inspect `root` without modifying it
    pub fn inspect(root: &Path) -> Self {
        let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());
        let exists = root.is_dir();

        let source_root = if root.join("src/app").is_dir() || root.join("src/pages").is_dir() {
            root.join("src")
        } else {
            root.clone()
        };

        let router = if source_root.join("app").is_dir() {
            Some(Router::App)
        } else if source_root.join("pages").is_dir() {
            Some(Router::Pages)
        } else {
            None
        };

        let has_tailwind_config = TAILWIND_CONFIGS.iter().any(|f| root.join(f).is_file());

        let globals_css = find_globals_css(&root)
            .unwrap_or_else(|| default_globals_css(&root, &source_root, router));

        tracing::debug!(
            root = %root.display(),
            exists,
            router = ?router,
            has_tailwind_config,
            globals_css = %globals_css.display(),
            "inspected project"
        );

        Self {
            root,
            exists,
            source_root,
            router,
            has_tailwind_config,
            globals_css,
        }
    }

    /// Path of `destination` relative to the project root, for display
    pub fn relative<'a>(&self, destination: &'a Path) -> &'a Path {
        destination.strip_prefix(&self.root).unwrap_or(destination)
    }
}

/// Shallowest `globals.css` in the project, preferring earlier paths at equal depth
fn find_globals_css(root: &Path) -> Option<PathBuf> {
    WalkDir::new(root)
        .max_depth(4)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| SKIP_DIRS.contains(&name))
        })
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && entry.file_name() == GLOBALS_CSS)
        .min_by_key(|entry| entry.depth())
        .and_then(|entry| entry.path().strip_prefix(root).ok().map(Path::to_path_buf))
}

fn default_globals_css(root: &Path, source_root: &Path, router: Option<Router>) -> PathBuf {
    let base = source_root.strip_prefix(root).unwrap_or(Path::new(""));
    match router {
        Some(Router::Pages) => base.join("styles").join(GLOBALS_CSS),
        _ => base.join("app").join(GLOBALS_CSS),
    }
}

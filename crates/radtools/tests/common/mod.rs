//! Common test utilities for radtools integration tests

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Number of bundled templates installed into an app-router project
#[allow(dead_code)]
pub const APP_ROUTER_FILES: usize = 11;

/// A scratch Next.js project
pub struct TestProject {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to project root
    pub path: PathBuf,
}

impl TestProject {
    /// Create an empty project directory
    pub fn empty() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Create a minimal app-router project without a root layout
    #[allow(dead_code)]
    pub fn app_router() -> Self {
        let project = Self::empty();
        project.write_file("package.json", "{ \"name\": \"web\", \"private\": true }\n");
        project.write_file("tailwind.config.ts", "export default {};\n");
        project.write_file("app/globals.css", "@tailwind base;\n");
        project.write_file("app/page.tsx", "export default function Page() { return null; }\n");
        project
    }

    /// Create a minimal pages-router project with a custom `_app`
    #[allow(dead_code)]
    pub fn pages_router() -> Self {
        let project = Self::empty();
        project.write_file("package.json", "{ \"name\": \"web\", \"private\": true }\n");
        project.write_file("styles/globals.css", "@tailwind base;\n");
        project.write_file(
            "pages/_app.tsx",
            "import type { AppProps } from 'next/app';\nimport '@/styles/globals.css';\n\nexport default function App({ Component, pageProps }: AppProps) {\n  return <Component {...pageProps} />;\n}\n",
        );
        project
    }

    /// Write a file in the project
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from the project
    #[allow(dead_code)]
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Check if a file exists in the project
    #[allow(dead_code)]
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Count every file and directory under the project root
    #[allow(dead_code)]
    pub fn entry_count(&self) -> usize {
        fn walk(dir: &Path) -> usize {
            std::fs::read_dir(dir)
                .expect("Failed to read directory")
                .map(|entry| {
                    let path = entry.expect("Failed to read entry").path();
                    1 + if path.is_dir() { walk(&path) } else { 0 }
                })
                .sum()
        }
        walk(&self.path)
    }

    /// `radtools` command running inside this project
    #[allow(dead_code)]
    pub fn radtools(&self) -> Command {
        let mut cmd = radtools_cmd();
        cmd.current_dir(&self.path);
        cmd
    }
}

/// The real radtools binary with colours and template overrides disabled
// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn radtools_cmd() -> Command {
    let mut cmd = Command::cargo_bin("radtools").expect("radtools binary not built");
    cmd.env("NO_COLOR", "1").env_remove("RADTOOLS_TEMPLATE_DIR");
    cmd
}

//! Dependency installation through the detected package manager
//!
//! Runs `<pm> add <packages>` in the project root, streaming its output.

use crate::error::{InstallError, Result};
use crate::runtime::PackageManager;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

/// Timeout for the package manager run (5 minutes)
const INSTALL_TIMEOUT: Duration = Duration::from_secs(300);

/// Adds template dependencies to a project with its package manager
pub struct DependencyInstaller {
    manager: PackageManager,
    project_root: PathBuf,
    packages: Vec<String>,
}

impl DependencyInstaller {
    pub fn new(manager: PackageManager, project_root: &Path, packages: Vec<String>) -> Self {
        Self {
            manager,
            project_root: project_root.to_path_buf(),
            packages,
        }
    }

    pub fn manager(&self) -> PackageManager {
        self.manager
    }

    pub fn packages(&self) -> &[String] {
        &self.packages
    }

    /// Human-readable command line, shown before running and in next steps
    pub fn command_line(&self) -> String {
        self.manager.add_command(&self.packages)
    }

    /// Run the package manager and stream its output
    pub async fn install(&self) -> Result<()> {
        if self.packages.is_empty() {
            return Ok(());
        }

        let cmd = self.command_line();
        println!();
        println!("{} {}", "Running:".dimmed(), cmd.yellow());
        println!();

        let mut child = TokioCommand::new(self.manager.name())
            .arg(self.manager.add_subcommand())
            .args(&self.packages)
            .current_dir(&self.project_root)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                InstallError::DependencyInstall(format!("could not start {}: {}", self.manager, e))
            })?;

        let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
            return Err(InstallError::DependencyInstall(
                "could not capture package manager output".to_string(),
            ));
        };

        let mut stdout_reader = BufReader::new(stdout).lines();
        let mut stderr_reader = BufReader::new(stderr).lines();

        let output_task = async {
            let mut stderr_open = true;
            loop {
                tokio::select! {
                    line = stdout_reader.next_line() => {
                        match line {
                            Ok(Some(line)) => println!("  {}", line),
                            Ok(None) => break,
                            Err(e) => {
                                eprintln!("{} {}", "Error reading stdout:".red(), e);
                                break;
                            }
                        }
                    }
                    line = stderr_reader.next_line(), if stderr_open => {
                        match line {
                            Ok(Some(line)) => eprintln!("  {}", line.yellow()),
                            Ok(None) => stderr_open = false,
                            Err(e) => {
                                eprintln!("{} {}", "Error reading stderr:".red(), e);
                                stderr_open = false;
                            }
                        }
                    }
                }
            }
        };

        if timeout(INSTALL_TIMEOUT, output_task).await.is_err() {
            let _ = child.kill().await;
            return Err(InstallError::DependencyInstall(format!(
                "timed out after {} seconds, run `{}` manually",
                INSTALL_TIMEOUT.as_secs(),
                cmd
            )));
        }

        match timeout(Duration::from_secs(10), child.wait()).await {
            Ok(Ok(status)) if status.success() => {
                println!();
                tracing::debug!(command = %cmd, "dependencies installed");
                Ok(())
            }
            Ok(Ok(status)) => Err(InstallError::DependencyInstall(format!(
                "`{}` exited with code {}",
                cmd,
                status.code().unwrap_or(-1)
            ))),
            Ok(Err(e)) => Err(InstallError::DependencyInstall(format!(
                "failed to wait for {}: {}",
                self.manager, e
            ))),
            Err(_) => {
                let _ = child.kill().await;
                Err(InstallError::DependencyInstall(format!(
                    "{} hung, run `{}` manually",
                    self.manager, cmd
                )))
            }
        }
    }
}

//! # Acquisition Commands
//!
//! An acquisition command is whatever the user runs to fetch or generate a
//! dataset: a download script, `rclone copy`, `wget`, ... The registrar treats
//! it as an opaque subprocess. Its only contract is that files appear in the
//! destination directory.
//!
//! The command string is split on whitespace into a program and arguments.
//! The source (when given) and the destination are appended as the final two
//! positional arguments. Commands run from the project root so relative
//! destinations land where they are recorded. There is no timeout: a command
//! that hangs hangs the registration.

use crate::env::Installer;
use crate::error::{RepokitError, Result};
use std::path::Path;
use std::process::Command;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquisitionCommand {
    program: String,
    args: Vec<String>,
}

/// Captured output of a successful run.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub invocation: String,
    pub stdout: String,
    pub stderr: String,
}

impl AcquisitionCommand {
    pub fn parse(run_command: &str) -> Result<Self> {
        let mut parts = run_command.split_whitespace().map(String::from);
        let program = parts
            .next()
            .ok_or_else(|| RepokitError::Api("Run command cannot be empty".into()))?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// The full argument vector for a run, program first.
    pub fn argv(&self, source: Option<&str>, destination: &str) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.args.len() + 3);
        argv.push(self.program.clone());
        argv.extend(self.args.iter().cloned());
        if let Some(source) = source {
            argv.push(source.to_string());
        }
        argv.push(destination.to_string());
        argv
    }

    pub fn run(
        &self,
        installer: &dyn Installer,
        working_dir: &Path,
        source: Option<&str>,
        destination: &str,
    ) -> Result<CommandOutput> {
        if !installer.is_installed(&self.program) {
            return Err(RepokitError::ExecutableNotFound(self.program.clone()));
        }

        let argv = self.argv(source, destination);
        let invocation = argv.join(" ");
        debug!("running acquisition command: {}", invocation);

        let output = Command::new(&argv[0])
            .args(&argv[1..])
            .current_dir(working_dir)
            .output()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    RepokitError::ExecutableNotFound(self.program.clone())
                }
                _ => RepokitError::Io(e),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(RepokitError::CommandExecution {
                command: invocation,
                status: output.status,
                stdout,
                stderr,
            });
        }

        Ok(CommandOutput {
            invocation,
            stdout,
            stderr,
        })
    }
}

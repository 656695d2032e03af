//! Synchronous invocation of external programs
//!
//! Every call runs to completion before returning. A non-zero exit status
//! or a failure to start the program is an error.

use crate::error::{Result, SelectorError};
use std::process::{Command, Stdio};
use tracing::trace;

/// A program and its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    program: String,
    args: Vec<String>,
}

impl ExternalCommand {
    pub fn new(program: impl Into<String>) -> Self {
        ExternalCommand {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Shell-like rendering used in logs and error messages
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn command(&self) -> Command {
        trace!(command = %self.display(), "+");
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }

    fn spawn_error(&self, source: std::io::Error) -> SelectorError {
        SelectorError::CommandSpawn {
            command: self.display(),
            source,
        }
    }

    /// Run with inherited standard streams
    ///
    /// The program's output reaches the caller's stdout and stderr untouched.
    pub fn run(&self) -> Result<()> {
        let status = self
            .command()
            .stdin(Stdio::null())
            .status()
            .map_err(|e| self.spawn_error(e))?;

        if !status.success() {
            return Err(SelectorError::CommandFailed {
                command: self.display(),
                code: status.code().unwrap_or(-1),
                stderr: String::new(),
            });
        }

        Ok(())
    }

    /// Run and capture standard output
    pub fn output(&self) -> Result<String> {
        let output = self
            .command()
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            return Err(SelectorError::CommandFailed {
                command: self.display(),
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

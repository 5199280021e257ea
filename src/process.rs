//! External process execution
//!
//! Every effect on git and GitHub goes through [`CommandRunner`], so tests
//! can substitute a runner that records invocations instead of spawning.

use crate::error::{Error, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// A command to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program name, resolved through `PATH`
    pub program: String,
    /// Arguments, passed verbatim (no shell)
    pub args: Vec<String>,
    /// Working directory
    pub cwd: Option<PathBuf>,
    /// Data written to stdin
    pub stdin: Option<String>,
}

impl Invocation {
    /// Start building an invocation
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: None,
            stdin: None,
        }
    }

    /// Run in `cwd`
    #[must_use]
    pub fn current_dir(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Feed `input` on stdin
    #[must_use]
    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    /// Human-readable command line
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(|part| {
                if part.is_empty() || part.contains(char::is_whitespace) {
                    format!("{part:?}")
                } else {
                    part.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Display for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// Captured result of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code (-1 when terminated by a signal)
    pub code: i32,
    /// Captured stdout
    pub stdout: String,
    /// Captured stderr
    pub stderr: String,
}

impl CommandOutput {
    /// Successful output with the given stdout
    pub fn ok(stdout: &str) -> Self {
        Self {
            code: 0,
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }

    /// Failed output with the given stderr
    pub fn failed(code: i32, stderr: &str) -> Self {
        Self {
            code,
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }

    /// Whether the process exited with 0
    pub const fn success(&self) -> bool {
        self.code == 0
    }

    /// Turn a non-zero exit into an error
    pub fn into_result(self, invocation: &Invocation) -> Result<Self> {
        if self.success() {
            Ok(self)
        } else {
            Err(Error::Command {
                command: invocation.command_line(),
                code: self.code,
                stderr: self.stderr.trim().to_string(),
            })
        }
    }
}

/// Runs external commands
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run to completion and capture output
    ///
    /// Returns `Ok` for any process that started, whatever its exit code;
    /// spawn failures are errors.
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutput>;

    /// Run and fail on non-zero exit, returning trimmed stdout
    async fn run_checked(&self, invocation: &Invocation) -> Result<String> {
        let output = self.run(invocation).await?.into_result(invocation)?;
        Ok(output.stdout.trim().to_string())
    }
}

/// Spawns real processes with `tokio::process`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        debug!(command = %invocation, "running");

        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(if invocation.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            });
        if let Some(cwd) = &invocation.cwd {
            command.current_dir(cwd);
        }

        let mut child = command.spawn().map_err(|e| {
            Error::Internal(format!("failed to start {}: {e}", invocation.program))
        })?;

        // The child may fill stdout before it has read all of stdin
        let stdin_pipe = child.stdin.take();
        let write_stdin = async {
            if let (Some(mut pipe), Some(input)) = (stdin_pipe, invocation.stdin.as_deref()) {
                pipe.write_all(input.as_bytes()).await?;
                // Dropping closes the pipe so the child sees EOF
                drop(pipe);
            }
            Ok::<_, std::io::Error>(())
        };

        let (written, output) = tokio::join!(write_stdin, child.wait_with_output());
        let output = output?;
        // A child that exits without reading stdin reports through its status
        if let Err(e) = written
            && e.kind() != ErrorKind::BrokenPipe
        {
            return Err(e.into());
        }
        let result = CommandOutput {
            code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(command = %invocation, code = result.code, "finished");
        Ok(result)
    }
}

use crate::shared::error::AnalysisError;
use crate::shared::Result;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

pub const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(60);

/// Captured result of one external command
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub tool: String,
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Fails with `ToolUnavailable` unless the command exited with status 0
    pub fn require_success(self) -> Result<Self> {
        if self.success {
            return Ok(self);
        }
        Err(AnalysisError::ToolUnavailable {
            tool: self.tool.clone(),
            details: format!(
                "exited with {}: {}",
                self.code.map_or_else(|| "signal".to_string(), |c| c.to_string()),
                first_line(&self.stderr)
            ),
        }
        .into())
    }

    /// Parses stdout as JSON regardless of the exit status.
    ///
    /// npm and depcheck exit non-zero when they *found* something, so the
    /// status alone does not tell a failure from a finding.
    pub fn parse_json<T: DeserializeOwned>(&self) -> Result<T> {
        let stdout = self.stdout.trim();
        if stdout.is_empty() {
            return Err(AnalysisError::ToolUnavailable {
                tool: self.tool.clone(),
                details: format!("no output: {}", first_line(&self.stderr)),
            }
            .into());
        }
        serde_json::from_str(stdout).map_err(|e| {
            AnalysisError::ToolUnavailable {
                tool: self.tool.clone(),
                details: format!("unparseable output: {}", e),
            }
            .into()
        })
    }
}

fn first_line(text: &str) -> &str {
    text.lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("")
}

/// Runs external commands with a hard timeout.
///
/// The child is killed when the timeout fires. A command that cannot be
/// spawned at all is reported as `ToolUnavailable`.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    timeout: Duration,
}

impl CommandRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<CommandOutput> {
        let tool = describe(program, args);
        debug!(tool = %tool, cwd = %cwd.display(), "running external tool");

        let mut command = Command::new(platform_program(program));
        command
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = command.spawn().map_err(|e| AnalysisError::ToolUnavailable {
            tool: tool.clone(),
            details: e.to_string(),
        })?;

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|e| AnalysisError::ToolUnavailable {
                tool: tool.clone(),
                details: e.to_string(),
            })?,
            Err(_) => {
                return Err(AnalysisError::ToolTimeout {
                    tool,
                    seconds: self.timeout.as_secs(),
                }
                .into())
            }
        };

        debug!(tool = %tool, status = ?output.status.code(), "external tool finished");
        Ok(CommandOutput {
            tool,
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::new(DEFAULT_TOOL_TIMEOUT)
    }
}

/// Program plus its subcommand words, e.g. `npx nx show`
fn describe(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied().take_while(|a| !a.starts_with('-')).take(3))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(windows)]
fn platform_program(program: &str) -> String {
    match program {
        "npm" | "npx" => format!("{}.cmd", program),
        other => other.to_string(),
    }
}

#[cfg(not(windows))]
fn platform_program(program: &str) -> String {
    program.to_string()
}

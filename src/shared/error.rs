use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - analysis finished (and no issues, when `--fail-on-issues` is set)
    Success = 0,
    /// The report contains issues and `--fail-on-issues` was requested
    IssuesDetected = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (unreadable repository, no projects, I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::IssuesDetected => write!(f, "Issues Detected (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for dependency analysis.
///
/// Only the variants raised as `Err` are fatal for a request. Tool and
/// manifest failures are normally absorbed into degraded reports; the
/// variants exist so adapters can describe what went wrong.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Invalid repository path: {path}\nReason: {reason}\n\n💡 Hint: Please specify the monorepo root directory with --path")]
    InvalidRepositoryPath { path: PathBuf, reason: String },

    #[error("No projects discovered under {root}\n\n💡 Hint: Add a workspace manifest or configure `project_dirs` in monorepo-deps.config.yml")]
    NoProjectsDiscovered { root: PathBuf },

    #[error("External tool '{tool}' is unavailable\nDetails: {details}")]
    ToolUnavailable { tool: String, details: String },

    #[error("External tool '{tool}' timed out after {seconds}s")]
    ToolTimeout { tool: String, seconds: u64 },

    #[error("Failed to read manifest: {path}\nDetails: {details}")]
    ManifestUnreadable { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },

    /// Validation error for configuration values
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Unknown operation: {name}\n\n💡 Hint: Valid operations are {valid}")]
    UnknownOperation { name: String, valid: String },
}

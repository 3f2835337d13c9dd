// ============================================================================
// pillarcrop-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error Types for the Core Library
//
// This module defines the error type shared by every part of pillarcrop-core.
// Errors fall into two classes: per-file problems (missing input, unreadable
// probe output, no usable video stream) that the batch orchestrator skips
// past, and fatal problems (failed execution, missing tools) that stop the
// whole run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by pillarcrop-core.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("ffprobe failed for {}: {message}", .path.display())]
    Probe { path: PathBuf, message: String },

    #[error("No video stream in {}", .0.display())]
    NoVideoStream(PathBuf),

    #[error("Could not read dimensions for {}", .0.display())]
    MissingDimensions(PathBuf),

    #[error("{tool} exited with {}", describe_exit(.code))]
    ExecutionFailed {
        tool: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Required dependency '{0}' not found in PATH")]
    DependencyNotFound(String),

    #[error("Failed to start '{0}': {1}")]
    CommandStart(String, #[source] io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for pillarcrop-core operations.
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Whether the batch may continue with the next file after this error.
    #[must_use]
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            CoreError::InputNotFound(_)
                | CoreError::Probe { .. }
                | CoreError::NoVideoStream(_)
                | CoreError::MissingDimensions(_)
        )
    }

    /// Exit code the process should terminate with for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            CoreError::ExecutionFailed { code: Some(code), .. } if *code != 0 => *code,
            _ => 1,
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// Wraps a spawn failure for `tool`.
pub fn command_start_error(tool: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandStart(tool.into(), err)
}

/// Wraps a non-zero exit of `tool` together with its captured diagnostics.
pub fn command_failed_error(
    tool: impl Into<String>,
    code: Option<i32>,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::ExecutionFailed {
        tool: tool.into(),
        code,
        stderr: stderr.into(),
    }
}

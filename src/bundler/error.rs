//! Error types for bundling operations.
//!
//! Most failures here end up downgraded to a per-target `Failed` result by
//! the orchestrator; only output-directory setup and a wholly absent
//! packaging tool abort a run.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for bundler operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for bundler operations
#[derive(Error, Debug)]
pub enum Error {
    /// A required external tool is not installed
    #[error("{tool} not found. {remediation}")]
    ToolMissing {
        /// Program name
        tool: String,
        /// Remediation instructions shown to the user
        remediation: String,
    },

    /// An external command exited non-zero
    #[error("{command} failed: {reason}")]
    CommandFailed {
        /// Command that failed
        command: String,
        /// Diagnostic captured from the tool
        reason: String,
    },

    /// The output directory could not be created or cleared
    #[error("cannot prepare output directory {path}: {source}")]
    OutputDirSetup {
        /// Output directory path
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// IO errors
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Info.plist encoding errors
    #[error("plist error: {0}")]
    Plist(#[from] plist::Error),

    /// Generic errors
    #[error("{0}")]
    GenericError(String),
}

/// Bail out of a bundler function with a formatted [`enum@Error`].
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)))
    };
}

/// Context for `Option` values, mirroring `anyhow::Context`.
pub trait Context<T> {
    /// Convert `None` into a [`enum@Error::GenericError`] with the given message.
    fn context(self, msg: &str) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context(self, msg: &str) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(msg.to_string()))
    }
}

/// Filesystem error context, attaching the operation and path to IO errors.
pub trait ErrorExt<T> {
    /// Wrap an IO error with the operation being attempted and the path involved.
    fn fs_context(self, operation: &str, path: &Path) -> Result<T>;
}

impl<T> ErrorExt<T> for std::io::Result<T> {
    fn fs_context(self, operation: &str, path: &Path) -> Result<T> {
        self.map_err(|e| {
            Error::GenericError(format!("{} ({}): {}", operation, path.display(), e))
        })
    }
}

impl Error {
    /// Build a [`enum@Error::CommandFailed`] from a finished process output.
    ///
    /// Prefers stderr for the diagnostic, falling back to stdout, then to the
    /// bare exit code.
    pub fn from_output(command: &str, output: &std::process::Output) -> Self {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        let diagnostic = if !stderr.trim().is_empty() {
            stderr.trim().to_string()
        } else if !stdout.trim().is_empty() {
            stdout.trim().to_string()
        } else {
            format!("exit code {:?}", output.status.code())
        };
        Error::CommandFailed {
            command: command.to_string(),
            reason: diagnostic,
        }
    }
}

//! Top-level error types for the distribution builder.
//!
//! Per-target build failures are not represented here: the orchestrator
//! downgrades them to recorded results. These types cover the few failures
//! that abort a run outright.

use thiserror::Error;

/// Result type alias for top-level operations
pub type Result<T> = std::result::Result<T, DistError>;

/// Main error type for the distribution builder
#[derive(Error, Debug)]
pub enum DistError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Bundler errors
    #[error("Bundler error: {0}")]
    Bundler(#[from] crate::bundler::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// The application source tree is missing a required file
    #[error("Invalid source tree: {reason}")]
    InvalidSourceTree {
        /// Reason for the error
        reason: String,
    },

    /// The dist.toml manifest could not be used
    #[error("Invalid manifest {path}: {reason}")]
    InvalidManifest {
        /// Path to the manifest
        path: String,
        /// Reason for the error
        reason: String,
    },
}

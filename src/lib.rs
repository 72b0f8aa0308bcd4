//! Multi-platform distribution builder for the SendApi desktop application.
//!
//! This library provides the build orchestration for creating:
//! - macOS disk images (.dmg wrapping a .app bundle)
//! - Windows single-file executables (.exe)
//! - Explanatory placeholder files for targets the host cannot build
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use error::{CliError, DistError, Result};

//! Packaging tool (PyInstaller) integration.
//!
//! The spec file handed to the tool is generated from a typed
//! [`SpecConfig`] through one dedicated encoder, so the generation logic is
//! testable without the tool installed.
//!
//! # Module Organization
//!
//! - [`spec`] - Typed spec-file configuration and encoder
//! - [`postprocess`] - Build tree scrubbing and permission normalization

pub mod postprocess;
pub mod spec;

pub use spec::SpecConfig;

use crate::bundler::error::{Error, ErrorExt, Result};
use crate::bundler::settings::Settings;
use std::path::{Path, PathBuf};

use super::builder::tool_detection;

/// Directory layout of one packaging invocation inside the build workspace.
#[derive(Debug)]
pub struct PackagingRun {
    /// Where the tool left the packaged output (`<dist>/<product name>` for
    /// a directory build, `<dist>/<product name>` binary for one-file).
    pub dist_dir: PathBuf,
}

/// Runs the packaging tool against a generated spec file.
///
/// The spec file is written into `workspace`, and the tool's scratch and
/// output directories are kept inside `workspace` too, so the whole
/// invocation disappears with the workspace.
///
/// # Errors
///
/// - [`Error::ToolMissing`] when the configured program cannot be spawned
/// - [`Error::CommandFailed`] with the tool diagnostic on non-zero exit
pub async fn run_packaging_tool(
    settings: &Settings,
    config: &SpecConfig,
    workspace: &Path,
) -> Result<PackagingRun> {
    let spec_path = workspace.join(format!("{}.spec", settings.product_name()));
    tokio::fs::write(&spec_path, config.render())
        .await
        .fs_context("writing packaging spec", &spec_path)?;

    let dist_dir = workspace.join("dist");
    let work_dir = workspace.join("build");

    let program = settings.pyinstaller_program();
    log::info!(
        "Running {} for {}",
        program.display(),
        settings.product_name()
    );

    let output = tokio::process::Command::new(program)
        .arg("--noconfirm")
        .arg("--clean")
        .arg("--distpath")
        .arg(&dist_dir)
        .arg("--workpath")
        .arg(&work_dir)
        .arg(&spec_path)
        .output()
        .await
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::ToolMissing {
                    tool: program.display().to_string(),
                    remediation: tool_detection::PYINSTALLER_REMEDIATION.to_string(),
                }
            } else {
                Error::GenericError(format!("failed to execute {}: {}", program.display(), e))
            }
        })?;

    if !output.status.success() {
        return Err(Error::from_output(&program.display().to_string(), &output));
    }

    log::debug!("Packaging tool finished, dist at {}", dist_dir.display());
    Ok(PackagingRun { dist_dir })
}

//! Windows build path: one-file executable.
//!
//! Only runs on a Windows host. There is no cross-compilation path: on any
//! other host the orchestrator routes the Windows target straight to the
//! placeholder generator, matching the original build tooling.

use crate::bundler::error::Result;
use crate::bundler::platform::BuildTarget;
use crate::bundler::pyinstaller::{self, SpecConfig, postprocess};
use crate::bundler::settings::Settings;
use crate::bundler::utils::fs;
use std::path::PathBuf;

/// Produces the Windows single-file executable.
///
/// # Process
///
/// 1. Create a scoped build workspace
/// 2. Run the packaging tool in one-file mode
/// 3. Scrub tool leftovers from the dist tree
/// 4. Copy the executable to its output-directory file name
///
/// # Returns
///
/// Path to the executable in the output directory.
pub async fn bundle_target(settings: &Settings) -> Result<PathBuf> {
    let target = BuildTarget::WindowsX64;
    log::info!("Building {} for {}", target, settings.product_name());

    let workspace = tempfile::tempdir()?;

    let config = SpecConfig::from_settings(settings, target);
    let run = pyinstaller::run_packaging_tool(settings, &config, workspace.path()).await?;

    postprocess::scrub_build_tree(&run.dist_dir).await?;

    // One-file mode leaves a single executable in the dist directory.
    let exe_name = format!("{}.exe", settings.product_name());
    let mut produced = run.dist_dir.join(&exe_name);
    if !produced.is_file() {
        // Some tool versions omit the extension
        produced = run.dist_dir.join(settings.product_name());
    }
    if !produced.is_file() {
        crate::bail!(
            "packaging tool reported success but produced no executable in {}",
            run.dist_dir.display()
        );
    }

    let artifact = settings
        .output_dir()
        .join(target.artifact_file_name(settings));
    fs::copy_file(&produced, &artifact).await?;

    drop(workspace);

    log::info!("✓ Created {}", artifact.display());
    Ok(artifact)
}

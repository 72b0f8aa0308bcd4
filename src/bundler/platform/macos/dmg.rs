//! Disk image creation via hdiutil.
//!
//! Creates drag-to-install DMG files: the staged volume holds the .app
//! bundle and an Applications symlink.

use crate::bundler::error::{Context, Error, ErrorExt, Result};
use crate::bundler::platform::BuildTarget;
use crate::bundler::settings::Settings;
use crate::bundler::utils::fs;
use crate::bundler::builder::tool_detection;
use std::path::{Path, PathBuf};

/// Creates a DMG from an assembled .app bundle.
///
/// # DMG Creation Steps
///
/// 1. Create a temporary staging directory
/// 2. Copy the .app bundle into it
/// 3. Create an Applications symlink for drag-to-install
/// 4. Run `hdiutil create` with UDZO compression
///
/// # Returns
///
/// Path to the created DMG in the output directory.
pub async fn create_dmg(
    settings: &Settings,
    target: BuildTarget,
    app_bundle: &Path,
) -> Result<PathBuf> {
    let dmg_path = settings
        .output_dir()
        .join(target.artifact_file_name(settings));

    // Remove any stale artifact from a previous attempt
    super::remove_stale(&dmg_path).await?;

    // Stage the volume contents
    let staging = tempfile::tempdir()?;
    let app_name = app_bundle
        .file_name()
        .context("invalid app bundle path")?;
    let staged_app = staging.path().join(app_name);

    log::debug!("Staging .app for DMG: {}", staged_app.display());
    fs::copy_dir(app_bundle, &staged_app).await?;

    // Applications symlink for drag-to-install UX
    #[cfg(unix)]
    {
        let applications_link = staging.path().join("Applications");
        std::os::unix::fs::symlink("/Applications", &applications_link)
            .fs_context("creating Applications symlink", &applications_link)?;
    }

    let program = settings.hdiutil_program();
    log::info!("Creating DMG with {}...", program.display());

    let output = tokio::process::Command::new(program)
        .arg("create")
        .arg("-volname")
        .arg(settings.product_name())
        .arg("-srcfolder")
        .arg(staging.path())
        .arg("-ov") // Overwrite if exists
        .arg("-format")
        .arg("UDZO")
        .arg(&dmg_path)
        .output()
        .await
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::ToolMissing {
                    tool: program.display().to_string(),
                    remediation: tool_detection::HDIUTIL_REMEDIATION.to_string(),
                }
            } else {
                Error::GenericError(format!("failed to execute {}: {}", program.display(), e))
            }
        })?;

    if !output.status.success() {
        return Err(Error::from_output(&program.display().to_string(), &output));
    }

    // Staging directory cleans up on drop
    drop(staging);

    Ok(dmg_path)
}

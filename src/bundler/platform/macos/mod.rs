//! macOS build path: packaged tree → .app bundle → DMG disk image.
//!
//! # Module Organization
//!
//! - [`app`] - .app bundle assembly and Info.plist generation
//! - [`dmg`] - Disk image creation via hdiutil

pub mod app;
pub mod dmg;

use crate::bundler::error::{Context, Result};
use crate::bundler::platform::BuildTarget;
use crate::bundler::pyinstaller::{self, SpecConfig, postprocess};
use crate::bundler::settings::Settings;
use crate::bundler::{builder::signing, utils::fs};
use std::path::PathBuf;

/// Produces one macOS target's disk image.
///
/// # Process
///
/// 1. Create a scoped build workspace (removed on every exit path)
/// 2. Generate the packaging spec and run the packaging tool
/// 3. Scrub caches/logs and normalize permissions in the packaged tree
/// 4. Assemble the `.app` bundle with a generated Info.plist
/// 5. Sign the bundle when credentials are configured (skipped, not fatal,
///    when they are not)
/// 6. Wrap the bundle into a DMG in the output directory
///
/// # Returns
///
/// Path to the created `.dmg` in the output directory.
pub async fn bundle_target(settings: &Settings, target: BuildTarget) -> Result<PathBuf> {
    log::info!("Building {} for {}", target, settings.product_name());

    let workspace = tempfile::tempdir()?;

    // Package the application
    let config = SpecConfig::from_settings(settings, target);
    let run = pyinstaller::run_packaging_tool(settings, &config, workspace.path()).await?;

    let packaged_dir = run.dist_dir.join(settings.product_name());
    if !packaged_dir.is_dir() {
        crate::bail!(
            "packaging tool reported success but produced no directory at {}",
            packaged_dir.display()
        );
    }

    // Clean up what the tool left behind
    postprocess::scrub_build_tree(&packaged_dir).await?;
    let entry_binary = packaged_dir.join(settings.product_name());
    postprocess::normalize_permissions(&packaged_dir, &entry_binary).await?;

    // Assemble the .app bundle inside the workspace
    let app_bundle = app::assemble_app_bundle(settings, &packaged_dir, workspace.path()).await?;

    // Sign if credentials are present
    signing::sign_app_if_configured(settings, &app_bundle).await?;

    // Wrap into the final DMG
    let dmg_path = dmg::create_dmg(settings, target, &app_bundle).await?;

    // Workspace cleans up on drop, also on the error paths above
    drop(workspace);

    let file_name = dmg_path
        .file_name()
        .context("DMG path has no file name")?
        .to_string_lossy()
        .into_owned();
    log::info!("✓ Created {}", file_name);

    Ok(dmg_path)
}

/// Removes a stale artifact from a previous attempt, if present.
pub(super) async fn remove_stale(path: &std::path::Path) -> Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path).await
    } else {
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

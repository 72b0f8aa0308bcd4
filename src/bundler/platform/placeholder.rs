//! Placeholder generation for targets the host cannot build.
//!
//! A placeholder is a small text file written at the exact path the real
//! artifact would occupy, so release tooling can always enumerate the same
//! output file set. Consumers must check the result kind before treating a
//! file as installable.

use crate::bundler::error::{ErrorExt, Result};
use crate::bundler::platform::{BuildTarget, HostPlatform};
use crate::bundler::settings::Settings;
use std::path::PathBuf;

/// Writes the placeholder file for one unbuildable target.
///
/// Refuses to overwrite an existing file at the artifact path: a produced
/// artifact must never be replaced by a stand-in.
///
/// # Returns
///
/// The placeholder path and the reason text it carries.
pub async fn write_placeholder(
    settings: &Settings,
    target: BuildTarget,
    host: HostPlatform,
) -> Result<(PathBuf, String)> {
    let path = settings
        .output_dir()
        .join(target.artifact_file_name(settings));
    if path.exists() {
        crate::bail!(
            "refusing to overwrite existing artifact with a placeholder: {}",
            path.display()
        );
    }

    let reason = target.placeholder_reason(host);
    let content = format!(
        "PLACEHOLDER - NOT AN INSTALLABLE ARTIFACT\n\
         \n\
         Target:  {} ({})\n\
         Host:    {}\n\
         \n\
         {}\n",
        target.display_name(),
        target.artifact_kind().label(),
        host.label(),
        reason,
    );

    tokio::fs::write(&path, content)
        .await
        .fs_context("writing placeholder", &path)?;

    log::info!("◌ Placeholder written for {}", target);
    Ok((path, reason))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::SettingsBuilder;

    fn test_settings(out: &std::path::Path) -> Settings {
        SettingsBuilder::new()
            .source_dir(".")
            .output_dir(out)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn placeholder_explains_limitation_at_artifact_path() {
        let dir = tempfile::tempdir().unwrap();
        let settings = test_settings(dir.path());

        let (path, reason) =
            write_placeholder(&settings, BuildTarget::WindowsX64, HostPlatform::MacOsArm64)
                .await
                .unwrap();

        assert_eq!(path, dir.path().join("SendApi-1.0.0-windows-x64.exe"));
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.is_empty());
        assert!(content.contains("Windows environment"));
        assert!(content.contains(&reason));
    }

    #[tokio::test]
    async fn placeholder_never_overwrites_existing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let settings = test_settings(dir.path());

        let artifact = dir.path().join("SendApi-1.0.0-arm64.dmg");
        std::fs::write(&artifact, b"real artifact").unwrap();

        let err =
            write_placeholder(&settings, BuildTarget::MacOsArm64, HostPlatform::Other).await;
        assert!(err.is_err());
        assert_eq!(std::fs::read(&artifact).unwrap(), b"real artifact");
    }
}

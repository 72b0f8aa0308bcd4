//! .app bundle assembly and Info.plist generation.
//!
//! The bundle metadata is a typed structure encoded through the plist
//! serializer, replacing the here-document plist templating of the original
//! build scripts.

use crate::bundler::error::{ErrorExt, Result};
use crate::bundler::settings::Settings;
use crate::bundler::utils::fs;
use std::path::{Path, PathBuf};

/// Typed Info.plist for the application bundle.
#[derive(Debug, Clone, serde::Serialize)]
pub struct InfoPlist {
    #[serde(rename = "CFBundleName")]
    pub bundle_name: String,

    #[serde(rename = "CFBundleDisplayName")]
    pub display_name: String,

    #[serde(rename = "CFBundleIdentifier")]
    pub identifier: String,

    #[serde(rename = "CFBundleVersion")]
    pub version: String,

    #[serde(rename = "CFBundleShortVersionString")]
    pub short_version: String,

    #[serde(rename = "CFBundleExecutable")]
    pub executable: String,

    #[serde(rename = "CFBundlePackageType")]
    pub package_type: String,

    #[serde(rename = "CFBundleInfoDictionaryVersion")]
    pub info_dictionary_version: String,

    #[serde(rename = "LSMinimumSystemVersion")]
    pub minimum_system_version: String,

    #[serde(rename = "NSHighResolutionCapable")]
    pub high_resolution_capable: bool,

    #[serde(rename = "NSPrincipalClass")]
    pub principal_class: String,
}

impl InfoPlist {
    /// Derives the bundle metadata from the run settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            bundle_name: settings.product_name().to_string(),
            display_name: settings.product_name().to_string(),
            identifier: settings.bundle_identifier().to_string(),
            version: settings.version_string().to_string(),
            short_version: settings.version_string().to_string(),
            executable: settings.product_name().to_string(),
            package_type: "APPL".to_string(),
            info_dictionary_version: "6.0".to_string(),
            minimum_system_version: settings
                .bundle_settings()
                .macos
                .minimum_system_version
                .clone(),
            high_resolution_capable: true,
            principal_class: "NSApplication".to_string(),
        }
    }

    /// Encodes this plist as XML into the given file.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path).fs_context("creating Info.plist", path)?;
        plist::to_writer_xml(file, self)?;
        Ok(())
    }
}

/// Assembles the standard application-bundle layout.
///
/// ```text
/// <ProductName>.app/
///   Contents/
///     Info.plist
///     MacOS/        <- the packaged tree (entry binary + support files)
///     Resources/
/// ```
///
/// # Returns
///
/// Path to the assembled `.app` directory inside `staging_dir`.
pub async fn assemble_app_bundle(
    settings: &Settings,
    packaged_dir: &Path,
    staging_dir: &Path,
) -> Result<PathBuf> {
    let bundle_root = staging_dir
        .join("bundle")
        .join(format!("{}.app", settings.product_name()));
    let contents = bundle_root.join("Contents");

    fs::create_dir_all(&contents.join("Resources"), false).await?;
    fs::copy_dir(packaged_dir, &contents.join("MacOS")).await?;

    let plist_path = contents.join("Info.plist");
    InfoPlist::from_settings(settings).write_to(&plist_path)?;

    log::debug!("Assembled app bundle at {}", bundle_root.display());
    Ok(bundle_root)
}

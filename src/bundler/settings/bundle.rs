//! Bundle layout configuration.

use super::MacOsSettings;
use std::path::PathBuf;

/// Bundle configuration shared by all build targets.
///
/// Describes what of the application source tree gets embedded into the
/// packaged output.
///
/// # Configuration
///
/// Add to `dist.toml`:
///
/// ```toml
/// [bundle]
/// identifier = "com.sendapi.desktop"
/// entry = "main.py"
/// data = ["data", "docs"]
/// ```
#[derive(Clone, Debug)]
pub struct BundleSettings {
    /// Reverse-DNS bundle identifier (CFBundleIdentifier on macOS).
    pub identifier: String,

    /// Entry-point script, relative to the source directory.
    pub entry_script: PathBuf,

    /// Data directories to embed, relative to the source directory.
    ///
    /// Missing directories are skipped with a warning rather than failing
    /// the build.
    pub data_dirs: Vec<String>,

    /// macOS-specific bundle settings.
    pub macos: MacOsSettings,
}

impl Default for BundleSettings {
    fn default() -> Self {
        Self {
            identifier: "com.sendapi.desktop".to_string(),
            entry_script: PathBuf::from("main.py"),
            data_dirs: vec!["data".to_string(), "docs".to_string()],
            macos: MacOsSettings::default(),
        }
    }
}

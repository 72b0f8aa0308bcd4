//! macOS platform-specific settings.

/// macOS application bundle (.app) configuration.
///
/// Configures the generated `Info.plist` and the DMG build path.
///
/// # Configuration
///
/// Add to `dist.toml`:
///
/// ```toml
/// [bundle.macos]
/// minimum_system_version = "10.15"
/// ```
///
/// Code signing is not configured here: the signing identity comes from the
/// `APPLE_SIGNING_IDENTITY` environment variable so CI credentials never
/// land in a checked-in file. See [`crate::bundler::builder::signing`].
#[derive(Clone, Debug)]
pub struct MacOsSettings {
    /// Minimum macOS version required (LSMinimumSystemVersion).
    ///
    /// Example: "10.15", "11.0"
    pub minimum_system_version: String,
}

impl Default for MacOsSettings {
    fn default() -> Self {
        Self {
            minimum_system_version: "10.15".to_string(),
        }
    }
}

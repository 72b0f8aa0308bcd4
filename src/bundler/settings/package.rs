//! Package metadata.

/// Application metadata used across all build targets.
///
/// This typically maps from the `[package]` section of `dist.toml`.
#[derive(Debug, Clone)]
pub struct PackageSettings {
    /// Product name displayed to users.
    ///
    /// Also used as the artifact file-name stem and the DMG volume name.
    pub product_name: String,

    /// Version string in semantic versioning format.
    ///
    /// Example: "1.0.0", "1.1.0-beta.1"
    pub version: String,

    /// Brief description of the application.
    pub description: String,

    /// Homepage URL for the application.
    ///
    /// Default: None
    pub homepage: Option<String>,

    /// List of package authors.
    ///
    /// Format: "Name <email@example.com>"
    ///
    /// Default: None
    pub authors: Option<Vec<String>>,
}

impl Default for PackageSettings {
    fn default() -> Self {
        Self {
            product_name: "SendApi".to_string(),
            version: "1.0.0".to_string(),
            description: "A desktop API testing application".to_string(),
            homepage: None,
            authors: None,
        }
    }
}

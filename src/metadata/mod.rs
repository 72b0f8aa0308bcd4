//! Application metadata and bundle layout from dist.toml.
//!
//! The manifest is optional: a missing file yields the built-in SendApi
//! defaults so the tool runs unconfigured from the application checkout.

use crate::bundler::settings::{BundleSettings, PackageSettings};
use crate::error::{CliError, DistError, Result};
use std::path::Path;

/// Parsed dist.toml content.
#[derive(Debug, Clone, Default)]
pub struct DistManifest {
    /// Package metadata ([package] section).
    pub package: PackageSettings,

    /// Bundle layout ([bundle] section).
    pub bundle: BundleSettings,
}

/// Loads the manifest from disk.
///
/// A missing file is not an error; the defaults describe the SendApi
/// application itself.
pub fn load_manifest(path: &Path) -> Result<DistManifest> {
    if !path.exists() {
        log::debug!("No manifest at {}, using defaults", path.display());
        return Ok(DistManifest::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        DistError::Cli(CliError::InvalidManifest {
            path: path.display().to_string(),
            reason: format!("cannot read: {}", e),
        })
    })?;

    parse_manifest(&content, &path.display().to_string())
}

/// Parses manifest content.
///
/// Every field is optional and falls back to its default; the version, when
/// given, must parse as a semantic version.
pub fn parse_manifest(content: &str, path: &str) -> Result<DistManifest> {
    let value: toml::Value = toml::from_str(content)?;
    let invalid = |reason: String| {
        DistError::Cli(CliError::InvalidManifest {
            path: path.to_string(),
            reason,
        })
    };

    let mut manifest = DistManifest::default();

    if let Some(package) = value.get("package") {
        if let Some(name) = package.get("name").and_then(|v| v.as_str()) {
            manifest.package.product_name = name.to_string();
        }
        if let Some(version) = package.get("version").and_then(|v| v.as_str()) {
            semver::Version::parse(version)
                .map_err(|e| invalid(format!("invalid version '{}': {}", version, e)))?;
            manifest.package.version = version.to_string();
        }
        if let Some(description) = package.get("description").and_then(|v| v.as_str()) {
            manifest.package.description = description.to_string();
        }
        manifest.package.homepage = package
            .get("homepage")
            .and_then(|v| v.as_str())
            .map(String::from);
        manifest.package.authors = package.get("authors").and_then(|v| v.as_array()).map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect()
        });
    }

    if let Some(bundle) = value.get("bundle") {
        if let Some(identifier) = bundle.get("identifier").and_then(|v| v.as_str()) {
            manifest.bundle.identifier = identifier.to_string();
        }
        if let Some(entry) = bundle.get("entry").and_then(|v| v.as_str()) {
            manifest.bundle.entry_script = entry.into();
        }
        if let Some(data) = bundle.get("data").and_then(|v| v.as_array()) {
            manifest.bundle.data_dirs = data
                .iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect();
        }
        if let Some(version) = bundle
            .get("macos")
            .and_then(|m| m.get("minimum_system_version"))
            .and_then(|v| v.as_str())
        {
            manifest.bundle.macos.minimum_system_version = version.to_string();
        }
    }

    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_manifest_yields_defaults() {
        let manifest = load_manifest(Path::new("/no/such/dist.toml")).unwrap();
        assert_eq!(manifest.package.product_name, "SendApi");
        assert_eq!(manifest.bundle.identifier, "com.sendapi.desktop");
        assert_eq!(manifest.bundle.data_dirs, vec!["data", "docs"]);
    }

    #[test]
    fn full_manifest_round_trips() {
        let manifest = parse_manifest(
            r#"
            [package]
            name = "SendApi"
            version = "1.1.0"
            description = "API tester"
            authors = ["SendApi Team <support@sendapi.com>"]

            [bundle]
            identifier = "com.sendapi.app"
            entry = "app.py"
            data = ["data"]

            [bundle.macos]
            minimum_system_version = "11.0"
            "#,
            "dist.toml",
        )
        .unwrap();

        assert_eq!(manifest.package.version, "1.1.0");
        assert_eq!(manifest.bundle.identifier, "com.sendapi.app");
        assert_eq!(manifest.bundle.entry_script, std::path::PathBuf::from("app.py"));
        assert_eq!(manifest.bundle.macos.minimum_system_version, "11.0");
    }

    #[test]
    fn invalid_version_is_rejected() {
        let err = parse_manifest("[package]\nversion = \"one.two\"\n", "dist.toml").unwrap_err();
        assert!(err.to_string().contains("invalid version"));
    }

    #[test]
    fn invalid_toml_is_rejected() {
        assert!(parse_manifest("not toml [", "dist.toml").is_err());
    }
}

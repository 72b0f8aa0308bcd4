//! Core Settings struct and implementations.

use super::{BundleSettings, PackageSettings};
use std::path::{Path, PathBuf};

/// Architecture preference for the macOS build path.
///
/// Selected by the optional positional CLI argument. Default is the host
/// architecture; requesting the other one is the operator's assertion that
/// the matching build environment (e.g. Rosetta for Intel output on Apple
/// Silicon) is installed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum ArchPreference {
    /// Target x86_64 output on the macOS build path.
    Intel,
    /// Target arm64 output on the macOS build path.
    Arm,
}

/// Main settings for a distribution run.
///
/// Central read-only configuration, constructed once via [`SettingsBuilder`]
/// and passed to every component. Contains package metadata, bundle layout,
/// directories, and the external tool programs to invoke.
///
/// # Examples
///
/// ```no_run
/// use sendapi_dist::bundler::{Settings, SettingsBuilder, PackageSettings};
///
/// # fn example() -> sendapi_dist::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .source_dir(".")
///     .output_dir("dist")
///     .package_settings(PackageSettings {
///         product_name: "SendApi".into(),
///         version: "1.0.0".into(),
///         ..Default::default()
///     })
///     .build()?;
/// # Ok(())
/// # }
/// ```
///
/// # See Also
///
/// - [`SettingsBuilder`] - Builder for constructing Settings
/// - [`PackageSettings`] - Package metadata
/// - [`BundleSettings`] - Bundle layout
///
/// [`SettingsBuilder`]: super::SettingsBuilder
#[derive(Clone, Debug)]
pub struct Settings {
    /// Package metadata.
    package: PackageSettings,

    /// Bundle layout.
    bundle: BundleSettings,

    /// Application source tree (contains the entry script and data dirs).
    source_dir: PathBuf,

    /// Output directory, cleared at run start.
    ///
    /// Sole destination for artifacts, placeholders, and manifests.
    output_dir: PathBuf,

    /// Architecture preference on the macOS build path.
    ///
    /// None means the host architecture.
    arch_preference: Option<ArchPreference>,

    /// Packaging tool program (name or path).
    pyinstaller_program: PathBuf,

    /// Disk-image tool program (name or path).
    hdiutil_program: PathBuf,
}

impl Settings {
    /// Returns the product name.
    pub fn product_name(&self) -> &str {
        &self.package.product_name
    }

    /// Returns the version string.
    pub fn version_string(&self) -> &str {
        &self.package.version
    }

    /// Returns the package description.
    pub fn description(&self) -> &str {
        &self.package.description
    }

    /// Returns the bundle identifier (e.g. "com.sendapi.desktop").
    pub fn bundle_identifier(&self) -> &str {
        &self.bundle.identifier
    }

    /// Returns the bundle settings.
    pub fn bundle_settings(&self) -> &BundleSettings {
        &self.bundle
    }

    /// Returns the application source directory.
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Returns the output directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Returns the absolute path to the entry-point script.
    pub fn entry_script(&self) -> PathBuf {
        self.source_dir.join(&self.bundle.entry_script)
    }

    /// Returns the architecture preference for the macOS build path.
    pub fn arch_preference(&self) -> Option<ArchPreference> {
        self.arch_preference
    }

    /// Returns the packaging tool program.
    pub fn pyinstaller_program(&self) -> &Path {
        &self.pyinstaller_program
    }

    /// Returns the disk-image tool program.
    pub fn hdiutil_program(&self) -> &Path {
        &self.hdiutil_program
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        package: PackageSettings,
        bundle: BundleSettings,
        source_dir: PathBuf,
        output_dir: PathBuf,
        arch_preference: Option<ArchPreference>,
        pyinstaller_program: PathBuf,
        hdiutil_program: PathBuf,
    ) -> Self {
        Self {
            package,
            bundle,
            source_dir,
            output_dir,
            arch_preference,
            pyinstaller_program,
            hdiutil_program,
        }
    }
}

//! Builder for constructing Settings.

use super::{ArchPreference, BundleSettings, PackageSettings, Settings};
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Provides a fluent API for building run settings with validation.
///
/// # Examples
///
/// ```no_run
/// use sendapi_dist::bundler::{SettingsBuilder, PackageSettings, ArchPreference};
///
/// # fn example() -> sendapi_dist::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .source_dir(".")
///     .output_dir("dist")
///     .package_settings(PackageSettings::default())
///     .arch_preference(Some(ArchPreference::Arm))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    source_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    package_settings: Option<PackageSettings>,
    bundle_settings: BundleSettings,
    arch_preference: Option<ArchPreference>,
    pyinstaller_program: Option<PathBuf>,
    hdiutil_program: Option<PathBuf>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the application source directory.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn source_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the output directory.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets package metadata.
    ///
    /// Default: [`PackageSettings::default()`] (the SendApi application).
    pub fn package_settings(mut self, settings: PackageSettings) -> Self {
        self.package_settings = Some(settings);
        self
    }

    /// Sets bundle layout.
    ///
    /// Default: [`BundleSettings::default()`]
    pub fn bundle_settings(mut self, settings: BundleSettings) -> Self {
        self.bundle_settings = settings;
        self
    }

    /// Sets the architecture preference for the macOS build path.
    ///
    /// Default: None (host architecture)
    pub fn arch_preference(mut self, preference: Option<ArchPreference>) -> Self {
        self.arch_preference = preference;
        self
    }

    /// Sets the packaging tool program.
    ///
    /// Default: "pyinstaller" resolved from PATH.
    pub fn pyinstaller_program<P: AsRef<Path>>(mut self, program: P) -> Self {
        self.pyinstaller_program = Some(program.as_ref().to_path_buf());
        self
    }

    /// Sets the disk-image tool program.
    ///
    /// Default: "hdiutil" resolved from PATH.
    pub fn hdiutil_program<P: AsRef<Path>>(mut self, program: P) -> Self {
        self.hdiutil_program = Some(program.as_ref().to_path_buf());
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing:
    /// - `source_dir`
    /// - `output_dir`
    pub fn build(self) -> crate::bundler::Result<Settings> {
        use crate::bundler::error::Context;

        Ok(Settings::new(
            self.package_settings.unwrap_or_default(),
            self.bundle_settings,
            self.source_dir.context("source_dir is required")?,
            self.output_dir.context("output_dir is required")?,
            self.arch_preference,
            self.pyinstaller_program
                .unwrap_or_else(|| PathBuf::from("pyinstaller")),
            self.hdiutil_program
                .unwrap_or_else(|| PathBuf::from("hdiutil")),
        ))
    }
}

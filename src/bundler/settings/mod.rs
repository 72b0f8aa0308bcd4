//! Configuration structures for distribution builds.
//!
//! This module provides the run configuration (the build context): package
//! metadata, bundle layout, platform-specific settings, and a builder for
//! constructing the whole thing once at process start.

mod builder;
mod bundle;
mod core;
mod macos;
mod package;

// Re-export all public types
pub use builder::SettingsBuilder;
pub use bundle::BundleSettings;
pub use core::{ArchPreference, Settings};
pub use macos::MacOsSettings;
pub use package::PackageSettings;

//! Command line argument parsing and validation.

use crate::bundler::ArchPreference;
use clap::Parser;
use std::path::PathBuf;

/// Multi-platform distribution builder for the SendApi desktop application
#[derive(Parser, Debug)]
#[command(
    name = "sendapi-dist",
    version,
    about = "Builds SendApi distributables for every target platform",
    long_about = "Builds SendApi distributables (.dmg on macOS, .exe on Windows) for every \
target platform the host supports, and writes explanatory placeholder files for the rest, \
so releases always ship the same predictable file set.

Usage:
  sendapi-dist                 # build for the host architecture
  sendapi-dist intel           # prefer the Intel build path on macOS
  sendapi-dist --output-dir out --source-dir ../sendapi

A run exits 0 even when some targets are placeholders or failed; per-target \
outcomes are in BUILD_SUMMARY.md and build-report.json."
)]
pub struct Args {
    /// Architecture preference for the macOS build path (default: host architecture)
    #[arg(value_enum, value_name = "ARCH")]
    pub arch: Option<ArchPreference>,

    /// Application source tree (contains the entry script and data directories)
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub source_dir: PathBuf,

    /// Output directory, cleared at the start of every run
    #[arg(long, value_name = "DIR", default_value = "dist")]
    pub output_dir: PathBuf,

    /// Manifest path (default: <source-dir>/dist.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Packaging tool program
    #[arg(
        long,
        value_name = "PROGRAM",
        env = "SENDAPI_PYINSTALLER",
        default_value = "pyinstaller"
    )]
    pub pyinstaller: PathBuf,

    /// Disk-image tool program
    #[arg(
        long,
        value_name = "PROGRAM",
        env = "SENDAPI_HDIUTIL",
        default_value = "hdiutil"
    )]
    pub hdiutil: PathBuf,

    /// Host OS name used for classification (for testing packaging decisions)
    #[arg(
        long,
        value_name = "OS",
        env = "SENDAPI_HOST_OS",
        default_value = std::env::consts::OS,
        hide = true
    )]
    pub host_os: String,

    /// Host architecture used for classification (for testing packaging decisions)
    #[arg(
        long,
        value_name = "ARCH",
        env = "SENDAPI_HOST_ARCH",
        default_value = std::env::consts::ARCH,
        hide = true
    )]
    pub host_arch: String,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if !self.source_dir.is_dir() {
            return Err(format!(
                "Source directory does not exist: {}",
                self.source_dir.display()
            ));
        }
        Ok(())
    }

    /// Path of the manifest to load.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| self.source_dir.join("dist.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_arch_preference_parses() {
        let args = Args::try_parse_from(["sendapi-dist", "intel"]).unwrap();
        assert_eq!(args.arch, Some(ArchPreference::Intel));

        let args = Args::try_parse_from(["sendapi-dist"]).unwrap();
        assert!(args.arch.is_none());
    }

    #[test]
    fn invalid_arch_preference_is_rejected() {
        assert!(Args::try_parse_from(["sendapi-dist", "sparc"]).is_err());
    }

    #[test]
    fn config_path_defaults_under_source_dir() {
        let args =
            Args::try_parse_from(["sendapi-dist", "--source-dir", "/srv/app"]).unwrap();
        assert_eq!(args.config_path(), PathBuf::from("/srv/app/dist.toml"));
    }

    #[test]
    fn validate_rejects_missing_source_dir() {
        let args =
            Args::try_parse_from(["sendapi-dist", "--source-dir", "/no/such/dir"]).unwrap();
        assert!(args.validate().is_err());
    }
}

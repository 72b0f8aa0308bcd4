//! Main orchestrator: the per-target state machine.
//!
//! Runs Init → Detecting → PerTarget(i) → Reporting → Done. Per-target
//! errors are downgraded to recorded [`BuildResult::Failed`] entries and
//! never abort the run; only output-directory setup and a wholly absent
//! packaging tool (when a native target needs it) are fatal.

use super::{BuildReport, BuildResult, checksum, tool_detection};
use crate::bundler::error::{Error, Result};
use crate::bundler::platform::{self, BuildTarget, HostPlatform};
use crate::bundler::settings::Settings;
use crate::bundler::{manifest, utils::fs};
use std::path::PathBuf;

/// Sequences the whole run: host classification is decided by the caller,
/// targets are processed in order, one result is recorded per target, and
/// the manifests are written at the end.
///
/// # Examples
///
/// ```no_run
/// use sendapi_dist::bundler::{Orchestrator, HostPlatform, SettingsBuilder};
///
/// # async fn example() -> sendapi_dist::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .source_dir(".")
///     .output_dir("dist")
///     .build()?;
/// let host = HostPlatform::classify(std::env::consts::OS, std::env::consts::ARCH);
///
/// let report = Orchestrator::new(settings, host).run().await?;
/// println!("{} produced, {} placeholders, {} failed",
///     report.produced_count(),
///     report.placeholder_count(),
///     report.failed_count());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Orchestrator {
    settings: Settings,
    host: HostPlatform,
}

impl Orchestrator {
    /// Creates a new orchestrator for the given settings and host
    /// classification.
    pub fn new(settings: Settings, host: HostPlatform) -> Self {
        Self { settings, host }
    }

    /// Returns a reference to the run settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the host classification this run executes under.
    pub fn host(&self) -> HostPlatform {
        self.host
    }

    /// Executes the run.
    ///
    /// # Errors
    ///
    /// - [`Error::OutputDirSetup`] when the output directory cannot be
    ///   cleared and recreated
    /// - [`Error::ToolMissing`] when at least one target is natively
    ///   buildable here and the packaging tool cannot be found
    ///
    /// Everything else is recorded in the returned report instead of
    /// propagating.
    pub async fn run(&self) -> Result<BuildReport> {
        let started_at = chrono::Utc::now();

        // Init → Detecting: clear the output directory
        self.prepare_output_dir().await?;

        // Detecting: gate on the packaging tool only when something here
        // actually needs it
        self.check_packaging_tool()?;
        log::info!("Host classified as {}", self.host);

        // PerTarget(i): advance regardless of each target's outcome
        let mut results = Vec::with_capacity(BuildTarget::ALL.len());
        for target in BuildTarget::ALL {
            results.push(self.process_target(target).await);
        }

        let report = BuildReport {
            product: self.settings.product_name().to_string(),
            version: self.settings.version_string().to_string(),
            host: self.host,
            started_at,
            results,
        };

        // Reporting → Done
        manifest::write_manifests(&self.settings, &report).await?;

        Ok(report)
    }

    async fn prepare_output_dir(&self) -> Result<()> {
        let output_dir = self.settings.output_dir();
        fs::create_dir_all(output_dir, true).await.map_err(|e| {
            let source = match e {
                Error::IoError(io) => io,
                other => std::io::Error::other(other.to_string()),
            };
            Error::OutputDirSetup {
                path: output_dir.to_path_buf(),
                source,
            }
        })
    }

    fn check_packaging_tool(&self) -> Result<()> {
        let needs_tool = BuildTarget::ALL
            .iter()
            .any(|t| t.buildable_on(self.host, self.settings.arch_preference()));
        if !needs_tool {
            return Ok(());
        }

        let program = self.settings.pyinstaller_program();
        match tool_detection::locate(program) {
            Some(_) => Ok(()),
            None => Err(Error::ToolMissing {
                tool: program.display().to_string(),
                remediation: tool_detection::PYINSTALLER_REMEDIATION.to_string(),
            }),
        }
    }

    /// Processes one target to completion, downgrading errors to results.
    async fn process_target(&self, target: BuildTarget) -> BuildResult {
        if target.buildable_on(self.host, self.settings.arch_preference()) {
            match self.build_target(target).await {
                Ok((path, size, checksum)) => BuildResult::Produced {
                    target,
                    path,
                    size,
                    checksum,
                },
                Err(e) => {
                    log::error!("✗ {} failed: {}", target, e);
                    BuildResult::Failed {
                        target,
                        reason: e.to_string(),
                    }
                }
            }
        } else {
            match platform::placeholder::write_placeholder(&self.settings, target, self.host).await
            {
                Ok((path, reason)) => BuildResult::Placeholder {
                    target,
                    path,
                    reason,
                },
                Err(e) => {
                    log::error!("✗ placeholder for {} failed: {}", target, e);
                    BuildResult::Failed {
                        target,
                        reason: e.to_string(),
                    }
                }
            }
        }
    }

    async fn build_target(&self, target: BuildTarget) -> Result<(PathBuf, u64, String)> {
        let path = match target {
            BuildTarget::MacOsArm64 | BuildTarget::MacOsX86_64 => {
                platform::macos::bundle_target(&self.settings, target).await?
            }
            BuildTarget::WindowsX64 => platform::windows::bundle_target(&self.settings).await?,
        };

        let size = fs::path_size(&path).await?;
        if size == 0 {
            crate::bail!("produced artifact is empty: {}", path.display());
        }
        let checksum = checksum::calculate_sha256(&path).await?;

        Ok((path, size, checksum))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::SettingsBuilder;

    fn settings_in(dir: &std::path::Path) -> Settings {
        SettingsBuilder::new()
            .source_dir(dir)
            .output_dir(dir.join("dist"))
            .pyinstaller_program("no-such-packaging-tool-12345")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn other_host_yields_three_placeholders() {
        let dir = tempfile::tempdir().unwrap();
        let orchestrator = Orchestrator::new(settings_in(dir.path()), HostPlatform::Other);

        let report = orchestrator.run().await.unwrap();

        assert_eq!(report.results.len(), BuildTarget::ALL.len());
        assert_eq!(report.placeholder_count(), 3);
        for target in BuildTarget::ALL {
            assert_eq!(
                report.results.iter().filter(|r| r.target() == target).count(),
                1,
                "expected exactly one result for {target}"
            );
        }
    }

    #[tokio::test]
    async fn missing_packaging_tool_is_fatal_only_for_native_hosts() {
        let dir = tempfile::tempdir().unwrap();

        // No native target on Other: the absent tool does not matter.
        let orchestrator = Orchestrator::new(settings_in(dir.path()), HostPlatform::Other);
        assert!(orchestrator.run().await.is_ok());

        // A macOS host natively builds a target, so the absent tool aborts.
        let orchestrator = Orchestrator::new(settings_in(dir.path()), HostPlatform::MacOsArm64);
        let err = orchestrator.run().await.unwrap_err();
        assert!(matches!(err, Error::ToolMissing { .. }));
    }

    #[tokio::test]
    async fn output_dir_setup_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        // Output dir path collides with an existing file.
        let blocker = dir.path().join("dist");
        std::fs::write(&blocker, b"in the way").unwrap();
        let settings = SettingsBuilder::new()
            .source_dir(dir.path())
            .output_dir(blocker.join("out"))
            .build()
            .unwrap();

        let err = Orchestrator::new(settings, HostPlatform::Other)
            .run()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::OutputDirSetup { .. }));
    }
}

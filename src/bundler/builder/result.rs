//! Per-target outcomes and the whole-run report.

use crate::bundler::platform::{BuildTarget, HostPlatform};
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Outcome of attempting to produce one build target.
///
/// Created once per target per run and never mutated afterwards.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum BuildResult {
    /// A real artifact was produced.
    Produced {
        /// Target this result belongs to.
        target: BuildTarget,
        /// Artifact path inside the output directory.
        path: PathBuf,
        /// Artifact size in bytes.
        size: u64,
        /// Hex-encoded SHA-256 of the artifact.
        checksum: String,
    },
    /// The host cannot build this target; a stand-in file was written.
    Placeholder {
        /// Target this result belongs to.
        target: BuildTarget,
        /// Placeholder path inside the output directory.
        path: PathBuf,
        /// Why the target could not be built here.
        reason: String,
    },
    /// The build was attempted and failed.
    Failed {
        /// Target this result belongs to.
        target: BuildTarget,
        /// Tool diagnostic or error message.
        reason: String,
    },
}

impl BuildResult {
    /// The target this result belongs to.
    pub fn target(&self) -> BuildTarget {
        match self {
            BuildResult::Produced { target, .. }
            | BuildResult::Placeholder { target, .. }
            | BuildResult::Failed { target, .. } => *target,
        }
    }

    /// True for [`BuildResult::Produced`].
    pub fn is_produced(&self) -> bool {
        matches!(self, BuildResult::Produced { .. })
    }
}

/// Aggregated outcome of one run.
#[derive(Debug, Clone, serde::Serialize)]
pub struct BuildReport {
    /// Product name.
    pub product: String,
    /// Product version.
    pub version: String,
    /// Host classification the run executed under.
    pub host: HostPlatform,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// One result per requested target, in processing order.
    pub results: Vec<BuildResult>,
}

impl BuildReport {
    /// Number of targets that produced a real artifact.
    pub fn produced_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_produced()).count()
    }

    /// Number of targets resolved via placeholder.
    pub fn placeholder_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r, BuildResult::Placeholder { .. }))
            .count()
    }

    /// Number of targets whose build failed.
    pub fn failed_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r, BuildResult::Failed { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_shape_carries_kind_tag() {
        let result = BuildResult::Placeholder {
            target: BuildTarget::WindowsX64,
            path: PathBuf::from("dist/SendApi-1.0.0-windows-x64.exe"),
            reason: "requires a Windows environment".to_string(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["kind"], "placeholder");
        assert_eq!(json["target"], "windows-x64");
    }

    #[test]
    fn report_counts_by_kind() {
        let report = BuildReport {
            product: "SendApi".into(),
            version: "1.0.0".into(),
            host: HostPlatform::MacOsArm64,
            started_at: Utc::now(),
            results: vec![
                BuildResult::Produced {
                    target: BuildTarget::MacOsArm64,
                    path: PathBuf::from("a.dmg"),
                    size: 1,
                    checksum: "00".into(),
                },
                BuildResult::Placeholder {
                    target: BuildTarget::MacOsX86_64,
                    path: PathBuf::from("b.dmg"),
                    reason: "r".into(),
                },
                BuildResult::Failed {
                    target: BuildTarget::WindowsX64,
                    reason: "r".into(),
                },
            ],
        };
        assert_eq!(report.produced_count(), 1);
        assert_eq!(report.placeholder_count(), 1);
        assert_eq!(report.failed_count(), 1);
    }
}

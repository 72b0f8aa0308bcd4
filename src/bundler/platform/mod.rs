//! Host classification and build target enumeration.
//!
//! The closed enums here replace the original string-compared OS branching:
//! adding a platform is a compile-checked change to [`HostPlatform`] and
//! [`BuildTarget`], not a new string comparison.

pub mod macos;
pub mod placeholder;
pub mod windows;

use super::settings::{ArchPreference, Settings};

/// Classification of the machine running the build.
///
/// Produced once per run by [`HostPlatform::classify`]. Anything that is not
/// a macOS or Windows host cannot natively build any target and falls into
/// [`HostPlatform::Other`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HostPlatform {
    /// Apple Silicon macOS host.
    MacOsArm64,
    /// Intel macOS host.
    MacOsX86_64,
    /// Windows host (any architecture).
    Windows,
    /// Linux or any unrecognized host.
    Other,
}

impl HostPlatform {
    /// Classifies a host from its reported OS name and machine architecture.
    ///
    /// Pure function of the two strings, as reported by
    /// `std::env::consts::{OS, ARCH}` (or overridden for testing). Unknown
    /// OS names classify as [`HostPlatform::Other`].
    pub fn classify(os: &str, arch: &str) -> Self {
        match os {
            "macos" => match arch {
                "aarch64" | "arm64" => HostPlatform::MacOsArm64,
                _ => HostPlatform::MacOsX86_64,
            },
            "windows" => HostPlatform::Windows,
            _ => HostPlatform::Other,
        }
    }

    /// Returns true for either macOS classification.
    pub fn is_macos(&self) -> bool {
        matches!(self, HostPlatform::MacOsArm64 | HostPlatform::MacOsX86_64)
    }

    /// Human-readable label for logs and manifests.
    pub fn label(&self) -> &'static str {
        match self {
            HostPlatform::MacOsArm64 => "macOS (arm64)",
            HostPlatform::MacOsX86_64 => "macOS (x86_64)",
            HostPlatform::Windows => "Windows",
            HostPlatform::Other => "Linux or other",
        }
    }

    /// The macOS architecture this host builds by default, honoring the
    /// operator's preference when one was given.
    pub fn effective_macos_arch(&self, preference: Option<ArchPreference>) -> Option<ArchPreference> {
        match preference {
            Some(p) => Some(p),
            None => match self {
                HostPlatform::MacOsArm64 => Some(ArchPreference::Arm),
                HostPlatform::MacOsX86_64 => Some(ArchPreference::Intel),
                _ => None,
            },
        }
    }
}

impl std::fmt::Display for HostPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Kind of distributable a target produces.
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    /// macOS disk image wrapping a .app bundle.
    DiskImage,
    /// Single-file executable.
    Executable,
}

impl ArtifactKind {
    /// Human-readable label for logs and manifests.
    pub fn label(&self) -> &'static str {
        match self {
            ArtifactKind::DiskImage => "disk image",
            ArtifactKind::Executable => "executable",
        }
    }
}

/// One (platform, architecture, artifact kind) the orchestrator attempts to
/// produce. Statically enumerated; see [`BuildTarget::ALL`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Serialize)]
pub enum BuildTarget {
    /// macOS Apple Silicon disk image.
    #[serde(rename = "macos-arm64")]
    MacOsArm64,
    /// macOS Intel disk image.
    #[serde(rename = "macos-x86_64")]
    MacOsX86_64,
    /// Windows x64 single-file executable.
    #[serde(rename = "windows-x64")]
    WindowsX64,
}

impl BuildTarget {
    /// Every target a run attempts, in processing order.
    pub const ALL: [BuildTarget; 3] = [
        BuildTarget::MacOsArm64,
        BuildTarget::MacOsX86_64,
        BuildTarget::WindowsX64,
    ];

    /// The kind of artifact this target produces.
    pub fn artifact_kind(&self) -> ArtifactKind {
        match self {
            BuildTarget::MacOsArm64 | BuildTarget::MacOsX86_64 => ArtifactKind::DiskImage,
            BuildTarget::WindowsX64 => ArtifactKind::Executable,
        }
    }

    /// Human-readable target name.
    pub fn display_name(&self) -> &'static str {
        match self {
            BuildTarget::MacOsArm64 => "macOS (Apple Silicon)",
            BuildTarget::MacOsX86_64 => "macOS (Intel)",
            BuildTarget::WindowsX64 => "Windows x64",
        }
    }

    /// Architecture string passed to the packaging tool on the macOS path.
    pub fn macos_target_arch(&self) -> Option<&'static str> {
        match self {
            BuildTarget::MacOsArm64 => Some("arm64"),
            BuildTarget::MacOsX86_64 => Some("x86_64"),
            BuildTarget::WindowsX64 => None,
        }
    }

    /// The file name this target's artifact (or its placeholder) gets in the
    /// output directory.
    ///
    /// Deterministic so release tooling can enumerate the output set without
    /// knowing what the build host was.
    pub fn artifact_file_name(&self, settings: &Settings) -> String {
        let name = settings.product_name();
        let version = settings.version_string();
        match self {
            BuildTarget::MacOsArm64 => format!("{name}-{version}-arm64.dmg"),
            BuildTarget::MacOsX86_64 => format!("{name}-{version}-x86_64.dmg"),
            BuildTarget::WindowsX64 => format!("{name}-{version}-windows-x64.exe"),
        }
    }

    /// Whether the given host can produce this target natively.
    ///
    /// The Windows target is never cross-built: the original build tooling
    /// has no Windows cross-compilation path and this limitation is kept.
    /// On macOS hosts, the architecture preference decides which of the two
    /// macOS targets the build path attempts.
    pub fn buildable_on(&self, host: HostPlatform, preference: Option<ArchPreference>) -> bool {
        match self {
            BuildTarget::WindowsX64 => host == HostPlatform::Windows,
            BuildTarget::MacOsArm64 => {
                host.is_macos() && host.effective_macos_arch(preference) == Some(ArchPreference::Arm)
            }
            BuildTarget::MacOsX86_64 => {
                host.is_macos()
                    && host.effective_macos_arch(preference) == Some(ArchPreference::Intel)
            }
        }
    }

    /// Why this target cannot be built on the given host.
    ///
    /// Written verbatim into the placeholder file.
    pub fn placeholder_reason(&self, host: HostPlatform) -> String {
        match self {
            BuildTarget::WindowsX64 => format!(
                "Building the {} {} requires a Windows environment. \
                 Cross-compilation from {} is not supported; run this tool on a \
                 Windows machine to produce the real artifact.",
                self.display_name(),
                self.artifact_kind().label(),
                host.label(),
            ),
            BuildTarget::MacOsArm64 | BuildTarget::MacOsX86_64 => {
                if host.is_macos() {
                    // Wrong architecture on an otherwise capable host.
                    let wanted = match self {
                        BuildTarget::MacOsArm64 => "arm",
                        _ => "intel",
                    };
                    format!(
                        "The {} build path was not selected on this {} host and no \
                         matching cross-build toolchain was assumed. Re-run with the \
                         '{}' architecture preference if that toolchain is installed.",
                        self.display_name(),
                        host.label(),
                        wanted,
                    )
                } else {
                    format!(
                        "Building the {} {} requires a macOS environment with the \
                         Xcode command line tools (hdiutil). This host is {}.",
                        self.display_name(),
                        self.artifact_kind().label(),
                        host.label(),
                    )
                }
            }
        }
    }
}

impl std::fmt::Display for BuildTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

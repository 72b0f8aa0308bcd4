//! External tool detection and version probing.
//!
//! Tool programs are configurable per run (CLI flag or environment), so
//! detection works on the configured program rather than a cached global.

use std::path::{Path, PathBuf};

/// Remediation text for a missing packaging tool.
pub const PYINSTALLER_REMEDIATION: &str = "Install it with 'pip install pyinstaller', or point \
     --pyinstaller (env SENDAPI_PYINSTALLER) at the executable.";

/// Remediation text for a missing disk-image tool.
pub const HDIUTIL_REMEDIATION: &str = "hdiutil ships with macOS; macOS disk images can only be \
     created on a macOS host.";

/// Locates a tool program.
///
/// Programs given as bare names are resolved through PATH; programs given
/// with a path component are checked directly.
pub fn locate(program: &Path) -> Option<PathBuf> {
    match which::which(program) {
        Ok(path) => {
            log::debug!("Found {} at {}", program.display(), path.display());
            Some(path)
        }
        Err(e) => {
            log::debug!("{} not found: {}", program.display(), e);
            None
        }
    }
}

/// Queries a tool's version string via `--version`.
///
/// Returns None on any failure; callers substitute a fixed "unknown" rather
/// than aborting.
pub async fn version_of(program: &Path) -> Option<String> {
    let output = tokio::process::Command::new(program)
        .arg("--version")
        .output()
        .await
        .ok()?;

    if !output.status.success() {
        log::debug!(
            "{} --version exited with {:?}",
            program.display(),
            output.status.code()
        );
        return None;
    }

    let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if version.is_empty() { None } else { Some(version) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locate_misses_unknown_program() {
        assert!(locate(Path::new("no-such-program-12345")).is_none());
    }

    #[test]
    #[cfg(unix)]
    fn locate_finds_shell() {
        assert!(locate(Path::new("sh")).is_some());
    }

    #[tokio::test]
    async fn version_of_missing_tool_is_none() {
        assert!(version_of(Path::new("no-such-program-12345")).await.is_none());
    }
}

//! Run manifests: the security disclosure, the build summary, and the
//! machine-readable JSON report.
//!
//! Rendering is a pure function of the build report; value probes that fail
//! (tool versions) degrade to "unknown" instead of aborting the run.

use crate::bundler::builder::{BuildReport, BuildResult, tool_detection};
use crate::bundler::error::{ErrorExt, Result};
use crate::bundler::settings::Settings;

/// File name of the build summary manifest.
pub const SUMMARY_FILE: &str = "BUILD_SUMMARY.md";

/// File name of the security disclosure manifest.
pub const DISCLOSURE_FILE: &str = "SECURITY_DISCLOSURE.md";

/// File name of the machine-readable report.
pub const REPORT_FILE: &str = "build-report.json";

/// Writes all run manifests into the output directory.
pub async fn write_manifests(settings: &Settings, report: &BuildReport) -> Result<()> {
    let tool_version = tool_detection::version_of(settings.pyinstaller_program())
        .await
        .unwrap_or_else(|| "unknown".to_string());

    let disclosure_path = settings.output_dir().join(DISCLOSURE_FILE);
    tokio::fs::write(&disclosure_path, render_security_disclosure(report, &tool_version))
        .await
        .fs_context("writing security disclosure", &disclosure_path)?;

    let summary_path = settings.output_dir().join(SUMMARY_FILE);
    tokio::fs::write(&summary_path, render_build_summary(report))
        .await
        .fs_context("writing build summary", &summary_path)?;

    let report_path = settings.output_dir().join(REPORT_FILE);
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| crate::bundler::Error::GenericError(format!("encoding report: {e}")))?;
    tokio::fs::write(&report_path, json)
        .await
        .fs_context("writing json report", &report_path)?;

    log::info!("Manifests written to {}", settings.output_dir().display());
    Ok(())
}

/// Renders the security disclosure document.
pub fn render_security_disclosure(report: &BuildReport, tool_version: &str) -> String {
    format!(
        "# Security Disclosure\n\
         \n\
         These {product} {version} artifacts are built from source with no \
         bundled third-party binaries beyond the application's declared \
         dependencies. Heavyweight numeric, plotting, and testing libraries \
         are excluded from the packaged output to keep the attack surface \
         small and to avoid false positives in antivirus scanners.\n\
         \n\
         Unless code-signing credentials were configured for this run, the \
         artifacts are unsigned:\n\
         \n\
         - Windows SmartScreen will warn before running the executable. \
           Choose \"More info\" then \"Run anyway\" after verifying the \
           checksum below.\n\
         - macOS Gatekeeper will warn on first launch. Right-click the app \
           and choose \"Open\", or allow it under System Settings > Privacy \
           & Security.\n\
         \n\
         Verify downloads against the SHA-256 checksums listed in \
         {summary} and {json_report} before installing.\n\
         \n\
         ## Build environment\n\
         \n\
         - Date: {date}\n\
         - Host: {host}\n\
         - Packaging tool: {tool_version}\n",
        product = report.product,
        version = report.version,
        summary = SUMMARY_FILE,
        json_report = REPORT_FILE,
        date = report.started_at.to_rfc3339(),
        host = report.host,
        tool_version = tool_version,
    )
}

/// Renders the human-readable build summary.
pub fn render_build_summary(report: &BuildReport) -> String {
    let mut out = format!(
        "# {} {} - Build Summary\n\nBuilt on {} at {}.\n\n## Artifacts\n\n",
        report.product,
        report.version,
        report.host,
        report.started_at.to_rfc3339(),
    );

    for result in &report.results {
        let line = match result {
            BuildResult::Produced {
                path,
                size,
                checksum,
                ..
            } => format!(
                "- ✓ {} ({}, sha256 {})\n",
                file_name_of(path),
                format_size(*size),
                checksum,
            ),
            BuildResult::Placeholder { path, reason, .. } => {
                format!("- ◌ {} (placeholder: {})\n", file_name_of(path), reason)
            }
            BuildResult::Failed { target, reason } => {
                format!("- ✗ {} failed: {}\n", target, reason)
            }
        };
        out.push_str(&line);
    }

    out.push_str(
        "\n## Next steps\n\
         \n\
         - Test each produced installer on a clean machine before release.\n\
         - Placeholder files are not installable; rebuild on the named \
           environment to replace them.\n\
         - Sign and notarize artifacts before wide distribution, then \
           publish the checksums alongside the downloads.\n",
    );

    out
}

fn file_name_of(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Formats a byte count for the summary ("912 B", "3.4 MB").
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["KB", "MB", "GB"];
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = UNITS[0];
    for next in &UNITS[1..] {
        if value < 1024.0 {
            break;
        }
        value /= 1024.0;
        unit = next;
    }
    format!("{:.1} {}", value, unit)
}

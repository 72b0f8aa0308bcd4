//! Command line interface for the distribution builder.
//!
//! Wires argument parsing, manifest loading, host classification, and the
//! orchestrator together, and prints the run summary.

mod args;
mod output;

pub use args::Args;
pub use output::OutputManager;

use crate::bundler::builder::{BuildReport, BuildResult};
use crate::bundler::{HostPlatform, Orchestrator, SettingsBuilder, manifest};
use crate::error::{CliError, Result};
use crate::metadata;

/// Main CLI entry point.
///
/// Returns the process exit code: 0 for any completed run (placeholders and
/// per-target failures included); fatal setup errors propagate as `Err` and
/// exit non-zero.
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let out = OutputManager::new(false);

    // Build the read-only context for the whole run
    let dist_manifest = metadata::load_manifest(&args.config_path())?;
    let settings = SettingsBuilder::new()
        .source_dir(&args.source_dir)
        .output_dir(&args.output_dir)
        .package_settings(dist_manifest.package)
        .bundle_settings(dist_manifest.bundle)
        .arch_preference(args.arch)
        .pyinstaller_program(&args.pyinstaller)
        .hdiutil_program(&args.hdiutil)
        .build()?;

    let entry = settings.entry_script();
    if !entry.is_file() {
        return Err(CliError::InvalidSourceTree {
            reason: format!("entry script not found: {}", entry.display()),
        }
        .into());
    }

    let host = HostPlatform::classify(&args.host_os, &args.host_arch);

    out.section(&format!(
        "{} {} distribution build",
        settings.product_name(),
        settings.version_string()
    ));
    out.info(&format!("Host: {}", host));
    out.info(&format!("Output: {}", settings.output_dir().display()));

    let report = Orchestrator::new(settings, host).run().await?;
    print_report(&out, &report);

    // Placeholders and per-target failures are informational, not fatal
    Ok(0)
}

fn print_report(out: &OutputManager, report: &BuildReport) {
    out.section("Results");
    for result in &report.results {
        match result {
            BuildResult::Produced { target, path, .. } => {
                out.success(&format!("{}: {}", target, path.display()));
            }
            BuildResult::Placeholder { target, reason, .. } => {
                out.warn(&format!("{}: placeholder ({})", target, reason));
            }
            BuildResult::Failed { target, reason } => {
                out.error(&format!("{}: {}", target, reason));
            }
        }
    }
    out.info(&format!(
        "\n{} produced, {} placeholders, {} failed (details in {})",
        report.produced_count(),
        report.placeholder_count(),
        report.failed_count(),
        manifest::SUMMARY_FILE,
    ));
}

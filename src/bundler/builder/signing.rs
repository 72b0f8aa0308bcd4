//! Code signing from environment credentials.
//!
//! The signing identity comes from the `APPLE_SIGNING_IDENTITY` environment
//! variable so CI credentials never land in configuration files. When the
//! variable is absent the step is skipped and logged, never fatal.

use crate::bundler::error::{Error, Result};
use crate::bundler::settings::Settings;
use std::path::Path;

/// Environment variable holding the signing identity name.
pub const SIGNING_IDENTITY_VAR: &str = "APPLE_SIGNING_IDENTITY";

/// Returns the configured signing identity, if any.
///
/// The "-" identity is Apple's marker for ad-hoc signatures; external
/// signing is skipped for it.
pub fn configured_identity() -> Option<String> {
    let identity = std::env::var(SIGNING_IDENTITY_VAR).ok()?;
    let identity = identity.trim().to_string();
    if identity.is_empty() || identity == "-" {
        return None;
    }
    Some(identity)
}

/// Signs an assembled .app bundle when credentials are configured.
///
/// - No identity in the environment: skipped with an info log.
/// - `codesign` not installed: skipped with a warning (the artifact ships
///   unsigned, as the disclosure manifest states).
/// - `codesign` exits non-zero: hard failure for this target.
pub async fn sign_app_if_configured(settings: &Settings, app_bundle: &Path) -> Result<()> {
    let Some(identity) = configured_identity() else {
        log::info!(
            "{} not set, skipping code signing for {}",
            SIGNING_IDENTITY_VAR,
            settings.product_name()
        );
        return Ok(());
    };

    log::info!("Signing {} with configured identity", app_bundle.display());

    let output = tokio::process::Command::new("codesign")
        .arg("--force")
        .arg("--deep")
        .arg("--sign")
        .arg(&identity)
        .arg(app_bundle)
        .output()
        .await;

    let output = match output {
        Ok(output) => output,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::warn!("codesign not found; artifact will ship unsigned");
            return Ok(());
        }
        Err(e) => {
            return Err(Error::GenericError(format!(
                "failed to execute codesign: {}",
                e
            )));
        }
    };

    if !output.status.success() {
        return Err(Error::from_output("codesign", &output));
    }

    log::info!("✓ Signed {}", app_bundle.display());
    Ok(())
}

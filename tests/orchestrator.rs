//! End-to-end runs of the sendapi-dist binary.
//!
//! External tools are replaced with fake executables so every packaging
//! decision can be exercised on any CI host. Host classification is forced
//! through the --host-os/--host-arch overrides.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};

/// Creates a minimal SendApi source tree.
fn app_source(root: &Path) -> PathBuf {
    let source = root.join("app");
    std::fs::create_dir_all(source.join("data")).unwrap();
    std::fs::create_dir_all(source.join("docs")).unwrap();
    std::fs::write(source.join("main.py"), "print('sendapi')\n").unwrap();
    std::fs::write(source.join("data/collections.json"), "{}\n").unwrap();
    std::fs::write(source.join("docs/README.md"), "# SendApi\n").unwrap();
    source
}

#[cfg(unix)]
fn write_script(path: &Path, content: &str) {
    use std::os::unix::fs::PermissionsExt;
    std::fs::write(path, content).unwrap();
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
}

/// Fake packaging tool: honors --distpath and emits a plausible onedir tree.
#[cfg(unix)]
fn fake_pyinstaller(root: &Path) -> PathBuf {
    let path = root.join("fake-pyinstaller");
    write_script(
        &path,
        r#"#!/bin/sh
if [ "$1" = "--version" ]; then echo "6.0.0-fake"; exit 0; fi
dist=""
prev=""
for a in "$@"; do
  if [ "$prev" = "--distpath" ]; then dist="$a"; fi
  prev="$a"
done
mkdir -p "$dist/SendApi/__pycache__"
printf 'binary' > "$dist/SendApi/SendApi"
printf 'cache' > "$dist/SendApi/__pycache__/m.pyc"
exit 0
"#,
    );
    path
}

/// Fake packaging tool that always fails with a diagnostic.
#[cfg(unix)]
fn failing_pyinstaller(root: &Path) -> PathBuf {
    let path = root.join("failing-pyinstaller");
    write_script(
        &path,
        "#!/bin/sh\necho 'spec analysis exploded' >&2\nexit 1\n",
    );
    path
}

/// Fake disk-image tool: writes bytes at the final argument.
#[cfg(unix)]
fn fake_hdiutil(root: &Path) -> PathBuf {
    let path = root.join("fake-hdiutil");
    write_script(
        &path,
        r#"#!/bin/sh
for a in "$@"; do last="$a"; done
printf 'dmg-bytes' > "$last"
exit 0
"#,
    );
    path
}

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("sendapi-dist").unwrap();
    cmd.env_remove("SENDAPI_PYINSTALLER")
        .env_remove("SENDAPI_HDIUTIL")
        .env_remove("SENDAPI_HOST_OS")
        .env_remove("SENDAPI_HOST_ARCH")
        .env_remove("APPLE_SIGNING_IDENTITY");
    cmd
}

fn output_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn other_host_produces_full_placeholder_set() {
    let dir = tempfile::tempdir().unwrap();
    let source = app_source(dir.path());
    let out = dir.path().join("dist");

    cmd()
        .arg("--source-dir")
        .arg(&source)
        .arg("--output-dir")
        .arg(&out)
        .arg("--host-os")
        .arg("linux")
        .arg("--host-arch")
        .arg("x86_64")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 placeholders"));

    // One file per target plus the three manifests
    assert_eq!(
        output_files(&out),
        vec![
            "BUILD_SUMMARY.md",
            "SECURITY_DISCLOSURE.md",
            "SendApi-1.0.0-arm64.dmg",
            "SendApi-1.0.0-windows-x64.exe",
            "SendApi-1.0.0-x86_64.dmg",
            "build-report.json",
        ]
    );

    // macOS placeholders name the required environment
    for name in ["SendApi-1.0.0-arm64.dmg", "SendApi-1.0.0-x86_64.dmg"] {
        let content = std::fs::read_to_string(out.join(name)).unwrap();
        assert!(!content.is_empty());
        assert!(content.contains("macOS environment"), "{name}: {content}");
    }
    let content = std::fs::read_to_string(out.join("SendApi-1.0.0-windows-x64.exe")).unwrap();
    assert!(content.contains("Windows environment"));
}

#[cfg(unix)]
#[test]
fn macos_arm_host_builds_arm_dmg_and_placeholders_rest() {
    let dir = tempfile::tempdir().unwrap();
    let source = app_source(dir.path());
    let out = dir.path().join("dist");

    cmd()
        .arg("--source-dir")
        .arg(&source)
        .arg("--output-dir")
        .arg(&out)
        .arg("--host-os")
        .arg("macos")
        .arg("--host-arch")
        .arg("aarch64")
        .arg("--pyinstaller")
        .arg(fake_pyinstaller(dir.path()))
        .arg("--hdiutil")
        .arg(fake_hdiutil(dir.path()))
        .assert()
        .success()
        .stdout(predicate::str::contains("1 produced"));

    // The produced DMG carries the fake tool's bytes, not placeholder text
    let dmg = std::fs::read(out.join("SendApi-1.0.0-arm64.dmg")).unwrap();
    assert_eq!(dmg, b"dmg-bytes");

    // The other targets are placeholders
    let intel = std::fs::read_to_string(out.join("SendApi-1.0.0-x86_64.dmg")).unwrap();
    assert!(intel.contains("PLACEHOLDER"));
    let windows = std::fs::read_to_string(out.join("SendApi-1.0.0-windows-x64.exe")).unwrap();
    assert!(windows.contains("Windows environment"));

    // Machine-readable report agrees
    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.join("build-report.json")).unwrap())
            .unwrap();
    let results = report["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0]["kind"], "produced");
    assert_eq!(results[0]["target"], "macos-arm64");
    assert_eq!(results[0]["checksum"].as_str().unwrap().len(), 64);
    assert_eq!(results[1]["kind"], "placeholder");
    assert_eq!(results[2]["kind"], "placeholder");
}

#[cfg(unix)]
#[test]
fn intel_preference_switches_macos_build_path() {
    let dir = tempfile::tempdir().unwrap();
    let source = app_source(dir.path());
    let out = dir.path().join("dist");

    cmd()
        .arg("intel")
        .arg("--source-dir")
        .arg(&source)
        .arg("--output-dir")
        .arg(&out)
        .arg("--host-os")
        .arg("macos")
        .arg("--host-arch")
        .arg("aarch64")
        .arg("--pyinstaller")
        .arg(fake_pyinstaller(dir.path()))
        .arg("--hdiutil")
        .arg(fake_hdiutil(dir.path()))
        .assert()
        .success();

    // Intel target built, arm target now the placeholder
    assert_eq!(
        std::fs::read(out.join("SendApi-1.0.0-x86_64.dmg")).unwrap(),
        b"dmg-bytes"
    );
    let arm = std::fs::read_to_string(out.join("SendApi-1.0.0-arm64.dmg")).unwrap();
    assert!(arm.contains("PLACEHOLDER"));
}

#[cfg(unix)]
#[test]
fn failing_packaging_tool_records_failure_but_run_completes() {
    let dir = tempfile::tempdir().unwrap();
    let source = app_source(dir.path());
    let out = dir.path().join("dist");

    cmd()
        .arg("--source-dir")
        .arg(&source)
        .arg("--output-dir")
        .arg(&out)
        .arg("--host-os")
        .arg("macos")
        .arg("--host-arch")
        .arg("aarch64")
        .arg("--pyinstaller")
        .arg(failing_pyinstaller(dir.path()))
        .arg("--hdiutil")
        .arg(fake_hdiutil(dir.path()))
        .assert()
        .success()
        .stdout(predicate::str::contains("1 failed"));

    // The failed native target left no artifact, but manifests still exist
    assert!(!out.join("SendApi-1.0.0-arm64.dmg").exists());
    let summary = std::fs::read_to_string(out.join("BUILD_SUMMARY.md")).unwrap();
    assert!(summary.contains("failed"));
    assert!(summary.contains("spec analysis exploded"));

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.join("build-report.json")).unwrap())
            .unwrap();
    assert_eq!(report["results"][0]["kind"], "failed");
}

#[test]
fn reruns_are_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let source = app_source(dir.path());
    let out = dir.path().join("dist");

    let run = || {
        cmd()
            .arg("--source-dir")
            .arg(&source)
            .arg("--output-dir")
            .arg(&out)
            .arg("--host-os")
            .arg("linux")
            .arg("--host-arch")
            .arg("x86_64")
            .assert()
            .success();
    };

    run();
    let first = output_files(&out);

    // Plant a stale file; the next run must clear it
    std::fs::write(out.join("leftover-from-run-1.bin"), b"stale").unwrap();
    run();
    let second = output_files(&out);

    assert_eq!(first, second);
    assert!(!out.join("leftover-from-run-1.bin").exists());
}

#[test]
fn blocked_output_dir_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let source = app_source(dir.path());
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"file in the way").unwrap();

    cmd()
        .arg("--source-dir")
        .arg(&source)
        .arg("--output-dir")
        .arg(blocker.join("dist"))
        .arg("--host-os")
        .arg("linux")
        .arg("--host-arch")
        .arg("x86_64")
        .assert()
        .failure()
        .stderr(predicate::str::contains("output directory"));
}

#[test]
fn missing_entry_script_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("empty");
    std::fs::create_dir_all(&source).unwrap();

    cmd()
        .arg("--source-dir")
        .arg(&source)
        .arg("--output-dir")
        .arg(dir.path().join("dist"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("entry script"));
}

#[test]
fn absent_packaging_tool_is_fatal_only_on_native_hosts() {
    let dir = tempfile::tempdir().unwrap();
    let source = app_source(dir.path());

    // Native host: fatal with remediation
    cmd()
        .arg("--source-dir")
        .arg(&source)
        .arg("--output-dir")
        .arg(dir.path().join("dist-a"))
        .arg("--host-os")
        .arg("macos")
        .arg("--host-arch")
        .arg("aarch64")
        .arg("--pyinstaller")
        .arg("no-such-packaging-tool-12345")
        .assert()
        .failure()
        .stderr(predicate::str::contains("pip install pyinstaller"));

    // Placeholder-only host: the same absent tool does not matter
    cmd()
        .arg("--source-dir")
        .arg(&source)
        .arg("--output-dir")
        .arg(dir.path().join("dist-b"))
        .arg("--host-os")
        .arg("linux")
        .arg("--host-arch")
        .arg("x86_64")
        .arg("--pyinstaller")
        .arg("no-such-packaging-tool-12345")
        .assert()
        .success();
}

#[test]
fn dist_manifest_overrides_artifact_naming() {
    let dir = tempfile::tempdir().unwrap();
    let source = app_source(dir.path());
    std::fs::write(
        source.join("dist.toml"),
        "[package]\nname = \"SendApi\"\nversion = \"2.3.0\"\n",
    )
    .unwrap();
    let out = dir.path().join("dist");

    cmd()
        .arg("--source-dir")
        .arg(&source)
        .arg("--output-dir")
        .arg(&out)
        .arg("--host-os")
        .arg("linux")
        .arg("--host-arch")
        .arg("x86_64")
        .assert()
        .success();

    assert!(out.join("SendApi-2.3.0-arm64.dmg").exists());
    assert!(out.join("SendApi-2.3.0-windows-x64.exe").exists());
}

//! Post-processing of the packaged build tree.
//!
//! The packaging tool leaves bytecode caches and scratch files behind, and
//! file permissions come out however the build user's umask left them. Both
//! are normalized before the tree is assembled into an artifact.

use crate::bundler::error::{Error, Result};
use std::path::{Path, PathBuf};

/// File names and extensions scrubbed from the packaged tree.
const SCRUB_EXTENSIONS: &[&str] = &["pyc", "pyo", "log", "tmp"];
const SCRUB_FILE_NAMES: &[&str] = &[".DS_Store"];
const SCRUB_DIR_NAMES: &[&str] = &["__pycache__"];

/// Removes bytecode caches, logs, and scratch files from a packaged tree.
///
/// Returns the number of entries removed.
pub async fn scrub_build_tree(root: &Path) -> Result<usize> {
    let root = root.to_path_buf();
    tokio::task::spawn_blocking(move || scrub_sync(&root))
        .await
        .map_err(|e| Error::GenericError(format!("scrub task panicked: {}", e)))?
}

fn scrub_sync(root: &Path) -> Result<usize> {
    let mut dirs: Vec<PathBuf> = Vec::new();
    let mut files: Vec<PathBuf> = Vec::new();

    for entry in walkdir::WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        let name = entry.file_name().to_string_lossy();
        if entry.file_type().is_dir() {
            if SCRUB_DIR_NAMES.iter().any(|d| *d == name) {
                dirs.push(entry.path().to_path_buf());
            }
        } else if entry.file_type().is_file() {
            let by_name = SCRUB_FILE_NAMES.iter().any(|f| *f == name);
            let by_ext = entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| SCRUB_EXTENSIONS.contains(&ext));
            if by_name || by_ext {
                files.push(entry.path().to_path_buf());
            }
        }
    }

    let mut removed = 0usize;
    for file in &files {
        // A file inside a scrubbed directory may already be gone.
        match std::fs::remove_file(file) {
            Ok(()) => removed += 1,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
    }
    for dir in &dirs {
        match std::fs::remove_dir_all(dir) {
            Ok(()) => removed += 1,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
    }

    log::debug!("Scrubbed {} entries from {}", removed, root.display());
    Ok(removed)
}

/// Normalizes permissions across a packaged tree.
///
/// Directories become 0o755, regular files 0o644, and the entry binary
/// 0o755. No-op on non-Unix hosts.
#[cfg(unix)]
pub async fn normalize_permissions(root: &Path, entry_binary: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let root = root.to_path_buf();
    let entry_binary = entry_binary.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<()> {
        for entry in walkdir::WalkDir::new(&root).into_iter().filter_map(|e| e.ok()) {
            let mode = if entry.file_type().is_dir() {
                0o755
            } else if entry.path() == entry_binary {
                0o755
            } else if entry.file_type().is_file() {
                // Bundled shared libraries keep their execute bit.
                let existing = entry.metadata().map(|m| m.permissions().mode()).unwrap_or(0);
                if existing & 0o111 != 0 { 0o755 } else { 0o644 }
            } else {
                continue;
            };
            std::fs::set_permissions(entry.path(), std::fs::Permissions::from_mode(mode))?;
        }
        Ok(())
    })
    .await
    .map_err(|e| Error::GenericError(format!("permissions task panicked: {}", e)))?
}

#[cfg(not(unix))]
pub async fn normalize_permissions(_root: &Path, _entry_binary: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scrub_removes_caches_and_scratch_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        std::fs::create_dir_all(root.join("app/__pycache__")).unwrap();
        std::fs::write(root.join("app/__pycache__/mod.cpython-312.pyc"), b"x").unwrap();
        std::fs::write(root.join("app/run.log"), b"x").unwrap();
        std::fs::write(root.join("app/scratch.tmp"), b"x").unwrap();
        std::fs::write(root.join("app/.DS_Store"), b"x").unwrap();
        std::fs::write(root.join("app/keep.py"), b"x").unwrap();

        scrub_build_tree(root).await.unwrap();

        assert!(!root.join("app/__pycache__").exists());
        assert!(!root.join("app/run.log").exists());
        assert!(!root.join("app/scratch.tmp").exists());
        assert!(!root.join("app/.DS_Store").exists());
        assert!(root.join("app/keep.py").exists());
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn permissions_normalized_with_executable_entry() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let entry = root.join("SendApi");
        std::fs::write(&entry, b"binary").unwrap();
        std::fs::write(root.join("resource.json"), b"{}").unwrap();
        std::fs::set_permissions(&entry, std::fs::Permissions::from_mode(0o600)).unwrap();

        normalize_permissions(root, &entry).await.unwrap();

        let entry_mode = std::fs::metadata(&entry).unwrap().permissions().mode() & 0o777;
        let file_mode = std::fs::metadata(root.join("resource.json"))
            .unwrap()
            .permissions()
            .mode()
            & 0o777;
        assert_eq!(entry_mode, 0o755);
        assert_eq!(file_mode, 0o644);
    }
}

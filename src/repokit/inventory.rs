//! # Filesystem Inventory
//!
//! Enumerates the regular files under a destination and summarizes them.
//!
//! Registration snapshots a destination before and after the acquisition
//! command runs; [`diff`] isolates the files the command created. Files that
//! were modified in place or deleted during the run are not reported: only
//! additions count as provenance.
//!
//! Sizes are megabytes as `f64` with MB = 1024 × 1024 bytes, both per file and
//! in total. Nothing is truncated to whole megabytes.

use crate::error::{RepokitError, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Every regular file under a path. Ordered, so equal filesystems give equal snapshots.
pub type Snapshot = BTreeSet<PathBuf>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileStats {
    pub count: usize,
    pub total_size_mb: f64,
    pub formats: BTreeSet<String>,
    /// Index-aligned with the described paths.
    pub sizes_mb: Vec<f64>,
}

pub fn snapshot(path: &Path) -> Result<Snapshot> {
    if !path.exists() {
        return Err(RepokitError::NotFound(path.to_path_buf()));
    }

    let mut files = Snapshot::new();
    for entry in WalkDir::new(path).follow_links(false) {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_file() {
            files.insert(entry.into_path());
        }
    }
    Ok(files)
}

pub fn diff(before: &Snapshot, after: &Snapshot) -> Snapshot {
    after.difference(before).cloned().collect()
}

pub fn describe<P: AsRef<Path>>(paths: &[P]) -> Result<FileStats> {
    let mut stats = FileStats::default();

    for path in paths {
        let path = path.as_ref();
        let bytes = fs::metadata(path)
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => RepokitError::NotFound(path.to_path_buf()),
                _ => RepokitError::Io(e),
            })?
            .len();
        let size_mb = bytes as f64 / BYTES_PER_MB;

        stats.count += 1;
        stats.total_size_mb += size_mb;
        stats.sizes_mb.push(size_mb);
        stats.formats.insert(extension_of(path));
    }

    Ok(stats)
}

/// Lower-cased extension including the leading dot; empty when the file has none.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default()
}

/// Lexically normalize a destination: host separators, no `.` components, no
/// trailing or doubled separators. `..` is kept. Only user-facing destinations
/// go through here; auto-derived names use [`crate::model::sanitize_name`].
pub fn normalize_destination(destination: &str) -> String {
    let separated = if cfg!(windows) {
        destination.replace('/', "\\")
    } else {
        destination.replace('\\', "/")
    };
    let normalized: PathBuf = Path::new(&separated)
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    if normalized.as_os_str().is_empty() {
        ".".to_string()
    } else {
        path_to_string(&normalized)
    }
}

pub fn path_to_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

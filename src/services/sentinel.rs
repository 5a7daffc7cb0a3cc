//! Sentinel marker discovery
//!
//! A file whose stem equals [`SENTINEL_STEM`] excuses its directory, and every
//! taxonomy folder below it, from holding evidence for the period.

use crate::SENTINEL_STEM;
use std::collections::HashSet;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

/// True when the file name's stem is the sentinel phrase.
#[must_use]
pub fn is_sentinel(path: &Path) -> bool {
    path.file_stem()
        .is_some_and(|stem| stem == OsStr::new(SENTINEL_STEM))
}

/// Collect every directory under `root` that directly holds a sentinel file.
///
/// Runs once per audit before reconciliation. Unreadable directories are
/// logged and skipped. Symlinked directories are not followed.
#[must_use]
pub fn collect_special_dirs(root: &Path) -> HashSet<PathBuf> {
    let mut special = HashSet::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let read_dir = match fs::read_dir(&dir) {
            Ok(rd) => rd,
            Err(err) => {
                log::warn!("Skipping unreadable directory {}: {err}", dir.display());
                continue;
            }
        };

        for entry in read_dir {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    log::warn!("Failed to read entry in {}: {err}", dir.display());
                    continue;
                }
            };

            let path = entry.path();
            let is_dir = entry.file_type().is_ok_and(|ft| ft.is_dir());

            if is_dir {
                pending.push(path);
            } else if path.is_file() && is_sentinel(&path) {
                log::trace!("Sentinel found in {}", dir.display());
                special.insert(dir.clone());
            }
        }
    }

    log::debug!(
        "Found {} justified directories under {}",
        special.len(),
        root.display()
    );
    special
}

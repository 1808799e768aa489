//! Candidate folder enumeration.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Every directory strictly below `root`, at any depth, sorted by path. A
/// root with no subdirectories is itself the single candidate.
///
/// Unreadable entries are logged and skipped; they never abort enumeration.
#[must_use]
pub fn candidate_folders(root: &Path) -> Vec<PathBuf> {
    let mut folders: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).follow_links(false) {
        match entry {
            Ok(entry) if entry.file_type().is_dir() => folders.push(entry.into_path()),
            Ok(_) => {}
            Err(err) => tracing::warn!(error = %err, "unreadable entry skipped"),
        }
    }
    folders.sort();

    if folders.is_empty() {
        folders.push(root.to_path_buf());
    }
    folders
}

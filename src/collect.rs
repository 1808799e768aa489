//! Folder-level segment discovery and ordering.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::BbResult;
use crate::sortkey::pad_numeric_runs;

/// True when `path` carries the target audio extension, ASCII
/// case-insensitive.
fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

/// True when the file looks like a previous merge output: its stem equals
/// the folder's own name, ASCII case-insensitive.
///
/// This is the same convention the merger uses when naming its output, which
/// keeps re-runs from merging an earlier output into itself or deleting it.
/// Replace this predicate to switch to another marking scheme.
fn is_prior_output(path: &Path, folder_name: &str) -> bool {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| stem.eq_ignore_ascii_case(folder_name))
}

/// List the segment files directly inside `folder`, ordered ascending by the
/// natural sort key of their stems.
///
/// Files with a different extension and a prior merge output are excluded.
/// Distinct names that collide on the same key are both retained; their
/// relative order is unspecified. A directory read failure fails the whole
/// folder and propagates to the caller.
pub fn collect_segments(
    folder: &Path,
    extension: &str,
    pad_width: usize,
) -> BbResult<Vec<PathBuf>> {
    let folder_name = folder
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();

    let mut keyed: Vec<(String, PathBuf)> = Vec::new();
    for entry in fs::read_dir(folder)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        if !has_extension(&path, extension) || is_prior_output(&path, folder_name) {
            continue;
        }
        let stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default();
        keyed.push((pad_numeric_runs(stem, pad_width), path));
    }

    // Stable sort on the key alone, so duplicate keys keep both entries.
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(keyed.into_iter().map(|(_, path)| path).collect())
}

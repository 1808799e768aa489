//! Machine-readable run records.
//!
//! With `--json` the binary prints one NDJSON record per processed folder
//! followed by a summary record, so scripted callers never have to parse log
//! lines.

use std::path::Path;

use serde::Serialize;

use crate::concat::{FolderOutcome, KeepReason};
use crate::error::BbError;

/// One NDJSON record per processed folder.
#[derive(Debug, Serialize)]
pub struct FolderRecord {
    pub event: &'static str,
    pub path: String,
    pub outcome: &'static str,
    pub segments: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl FolderRecord {
    #[must_use]
    pub fn from_outcome(folder: &Path, outcome: &FolderOutcome) -> Self {
        let path = folder.display().to_string();
        match outcome {
            FolderOutcome::Skipped { segments } => Self {
                event: "folder",
                path,
                outcome: "skipped",
                segments: *segments,
                output: None,
                detail: None,
            },
            FolderOutcome::Cleaned { segments, output } => Self {
                event: "folder",
                path,
                outcome: "cleaned",
                segments: *segments,
                output: Some(output.display().to_string()),
                detail: None,
            },
            FolderOutcome::Kept {
                segments,
                output,
                reason,
            } => {
                let (outcome, detail) = match reason {
                    KeepReason::Requested => ("kept", None),
                    KeepReason::ToolFailed { code } => {
                        ("failed", Some(format!("tool exited with status {code}")))
                    }
                    KeepReason::ToolUnavailable { detail } => ("failed", Some(detail.clone())),
                };
                Self {
                    event: "folder",
                    path,
                    outcome,
                    segments: *segments,
                    output: Some(output.display().to_string()),
                    detail,
                }
            }
        }
    }

    /// Record for a folder whose scan failed before any merge decision.
    #[must_use]
    pub fn from_error(folder: &Path, error: &BbError) -> Self {
        Self {
            event: "folder",
            path: folder.display().to_string(),
            outcome: "error",
            segments: 0,
            output: None,
            detail: Some(error.to_string()),
        }
    }
}

/// Counters for the whole run; printed as the final NDJSON record and logged
/// on completion. `merged` counts successful tool invocations whether or not
/// the originals were deleted afterwards.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub event: &'static str,
    pub folders: usize,
    pub merged: usize,
    pub cleaned: usize,
    pub kept: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl Default for RunSummary {
    fn default() -> Self {
        Self {
            event: "summary",
            folders: 0,
            merged: 0,
            cleaned: 0,
            kept: 0,
            skipped: 0,
            failed: 0,
        }
    }
}

impl RunSummary {
    pub fn observe(&mut self, outcome: &FolderOutcome) {
        self.folders += 1;
        match outcome {
            FolderOutcome::Skipped { .. } => self.skipped += 1,
            FolderOutcome::Cleaned { .. } => {
                self.merged += 1;
                self.cleaned += 1;
            }
            FolderOutcome::Kept { reason, .. } => match reason {
                KeepReason::Requested => {
                    self.merged += 1;
                    self.kept += 1;
                }
                KeepReason::ToolFailed { .. } | KeepReason::ToolUnavailable { .. } => {
                    self.failed += 1;
                }
            },
        }
    }

    pub fn observe_error(&mut self) {
        self.folders += 1;
        self.failed += 1;
    }
}

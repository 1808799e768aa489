//! Per-folder merge orchestration.
//!
//! One folder is taken to a terminal state at a time:
//! `Scanned -> {Skipped | MergeAttempted -> {Cleaned | Kept}}`. Deleting the
//! source segments is all-or-nothing and gated solely on the tool's exit
//! status; nothing verifies that the output file was actually written.

use std::fs;
use std::path::{Path, PathBuf};

use crate::collect::collect_segments;
use crate::error::{BbError, BbResult};
use crate::process::{render_command, run_command};

/// Stream-copy concatenation capability.
///
/// The merger depends on this abstraction rather than on one specific
/// binary, so another tool or a test double can stand in for ffmpeg.
pub trait Concatenate {
    /// Concatenate `inputs` in order into `output` without re-encoding.
    ///
    /// Returns the tool's exit status; `Err` means the tool never ran.
    fn concat(&self, inputs: &[PathBuf], output: &Path) -> BbResult<ToolStatus>;
}

/// Exit status of one external tool invocation. stderr is kept for
/// diagnostics only and never drives control decisions.
#[derive(Debug, Clone)]
pub struct ToolStatus {
    pub code: i32,
    pub stderr: String,
}

impl ToolStatus {
    #[must_use]
    pub const fn success(&self) -> bool {
        self.code == 0
    }
}

/// ffmpeg-compatible concatenation via the `concat:` protocol with audio
/// stream copy.
pub struct FfmpegConcat {
    tool: PathBuf,
}

impl FfmpegConcat {
    #[must_use]
    pub fn new(tool: PathBuf) -> Self {
        Self { tool }
    }

    /// `-y -i concat:<a>|<b>|... -acodec copy <out>`, quieted down so only
    /// real errors reach stderr.
    fn build_args(inputs: &[PathBuf], output: &Path) -> Vec<String> {
        let joined = inputs
            .iter()
            .map(|path| path.display().to_string())
            .collect::<Vec<_>>()
            .join("|");
        vec![
            "-hide_banner".to_owned(),
            "-loglevel".to_owned(),
            "error".to_owned(),
            "-y".to_owned(),
            "-i".to_owned(),
            format!("concat:{joined}"),
            "-acodec".to_owned(),
            "copy".to_owned(),
            output.display().to_string(),
        ]
    }
}

impl Concatenate for FfmpegConcat {
    fn concat(&self, inputs: &[PathBuf], output: &Path) -> BbResult<ToolStatus> {
        let args = Self::build_args(inputs, output);
        tracing::debug!(command = %render_command(&self.tool, &args), "invoking concat tool");
        let out = run_command(&self.tool, &args)?;
        Ok(ToolStatus {
            code: out.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
        })
    }
}

/// Read-only configuration shared by every folder in one run.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    pub extension: String,
    pub pad_width: usize,
    pub keep_originals: bool,
}

/// Terminal state of one folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderOutcome {
    /// Fewer than two segments; nothing to merge.
    Skipped { segments: usize },
    /// Merge succeeded and the source segments were deleted.
    Cleaned { segments: usize, output: PathBuf },
    /// Source segments kept on disk.
    Kept {
        segments: usize,
        output: PathBuf,
        reason: KeepReason,
    },
}

/// Why the source segments were kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeepReason {
    /// Merge succeeded; deletion suppressed by the keep-originals flag.
    Requested,
    /// Tool ran and exited non-zero.
    ToolFailed { code: i32 },
    /// Tool could not be started at all.
    ToolUnavailable { detail: String },
}

pub struct Merger<C> {
    concat: C,
    config: MergeConfig,
}

impl<C: Concatenate> Merger<C> {
    pub fn new(concat: C, config: MergeConfig) -> Self {
        Self { concat, config }
    }

    /// Process one folder to a terminal state.
    ///
    /// Scan errors propagate as `Err`; invocation failures do not. They
    /// resolve to `Kept` so the run can continue with the next folder and
    /// the user can retry after fixing the problem.
    pub fn process_folder(&self, folder: &Path) -> BbResult<FolderOutcome> {
        let segments = collect_segments(folder, &self.config.extension, self.config.pad_width)?;
        if segments.len() < 2 {
            tracing::debug!(
                folder = %folder.display(),
                segments = segments.len(),
                "nothing to merge"
            );
            return Ok(FolderOutcome::Skipped {
                segments: segments.len(),
            });
        }

        let output = self.output_path(folder)?;
        let status = match self.concat.concat(&segments, &output) {
            Ok(status) => status,
            Err(err) => {
                tracing::warn!(
                    folder = %folder.display(),
                    error = %err,
                    "concat tool could not be started; originals kept"
                );
                return Ok(FolderOutcome::Kept {
                    segments: segments.len(),
                    output,
                    reason: KeepReason::ToolUnavailable {
                        detail: err.to_string(),
                    },
                });
            }
        };

        if !status.success() {
            tracing::warn!(
                folder = %folder.display(),
                code = status.code,
                stderr = %status.stderr.trim(),
                "concat tool failed; originals kept"
            );
            return Ok(FolderOutcome::Kept {
                segments: segments.len(),
                output,
                reason: KeepReason::ToolFailed { code: status.code },
            });
        }

        if self.config.keep_originals {
            return Ok(FolderOutcome::Kept {
                segments: segments.len(),
                output,
                reason: KeepReason::Requested,
            });
        }

        for segment in &segments {
            fs::remove_file(segment)?;
        }
        Ok(FolderOutcome::Cleaned {
            segments: segments.len(),
            output,
        })
    }

    /// The output lands next to the segments and is named after the folder,
    /// the same convention `collect` uses to exclude prior outputs.
    fn output_path(&self, folder: &Path) -> BbResult<PathBuf> {
        let name = folder
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| BbError::FolderUnnamed(folder.to_path_buf()))?;
        Ok(folder.join(format!("{name}.{}", self.config.extension)))
    }
}

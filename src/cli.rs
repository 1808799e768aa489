use std::path::PathBuf;

use clap::Parser;

use crate::error::{BbError, BbResult};
use crate::process::resolve_tool;
use crate::sortkey::DEFAULT_PAD_WIDTH;

#[derive(Debug, Parser)]
#[command(name = "bookbind")]
#[command(about = "Merge per-folder audio segments into one file per folder via stream-copy concat")]
pub struct Cli {
    /// Root folder to scan (recursive).
    #[arg(value_name = "ROOT")]
    pub root: String,

    /// Path or name of the ffmpeg-compatible tool used for concatenation.
    #[arg(short = 'f', long = "ffmpeg", default_value = "ffmpeg")]
    pub ffmpeg: String,

    /// Keep (do not delete) original segment files after a successful merge.
    #[arg(short = 'k', long = "keep-originals", default_value_t = false)]
    pub keep_originals: bool,

    /// Audio file extension to collect (case-insensitive).
    #[arg(long, default_value = "mp3")]
    pub ext: String,

    /// Minimum width digit runs are padded to when building sort keys.
    #[arg(long, default_value_t = DEFAULT_PAD_WIDTH)]
    pub pad_width: usize,

    /// Emit NDJSON folder records and a run summary on stdout.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

/// Validated run configuration, passed explicitly into the merger so no
/// ambient state is shared across folders.
#[derive(Debug, Clone)]
pub struct Config {
    pub tool: PathBuf,
    pub root: PathBuf,
    pub extension: String,
    pub pad_width: usize,
    pub keep_originals: bool,
    pub json: bool,
}

/// Strip trailing quotes, whitespace and path separators that shells and
/// drag-and-drop leave on path arguments.
fn trim_path_argument(raw: &str) -> &str {
    raw.trim_end_matches(['"', ' ', '/', '\\'])
}

impl Cli {
    /// Validate into a [`Config`], collecting every problem before failing
    /// so the user sees all of them at once.
    pub fn into_config(self) -> BbResult<Config> {
        let mut problems = Vec::new();

        let tool = match resolve_tool(trim_path_argument(&self.ffmpeg)) {
            Ok(path) => Some(path),
            Err(err) => {
                problems.push(err.to_string());
                None
            }
        };

        let root = PathBuf::from(trim_path_argument(&self.root));
        if !root.is_dir() {
            problems.push(format!("root path is not a directory: {}", root.display()));
        }

        let extension = self.ext.trim_start_matches('.').to_owned();
        if extension.is_empty() {
            problems.push("extension must not be empty".to_owned());
        }

        if let Some(tool) = tool {
            if problems.is_empty() {
                return Ok(Config {
                    tool,
                    root,
                    extension,
                    pad_width: self.pad_width,
                    keep_originals: self.keep_originals,
                    json: self.json,
                });
            }
        }
        Err(BbError::InvalidConfig(problems.join("; ")))
    }
}

use clap::Parser;

use bookbind::cli::{Cli, Config};
use bookbind::report::{FolderRecord, RunSummary};
use bookbind::walk::candidate_folders;
use bookbind::{BbResult, FfmpegConcat, FolderOutcome, KeepReason, MergeConfig, Merger};

fn main() {
    bookbind::logging::init();

    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run() -> BbResult<()> {
    let config = Cli::parse().into_config()?;

    tracing::info!(
        tool = %config.tool.display(),
        root = %config.root.display(),
        keep_originals = config.keep_originals,
        "starting scan"
    );

    let summary = merge_tree(&config)?;

    if config.json {
        println!("{}", serde_json::to_string(&summary)?);
    }
    tracing::info!(
        folders = summary.folders,
        merged = summary.merged,
        cleaned = summary.cleaned,
        kept = summary.kept,
        skipped = summary.skipped,
        failed = summary.failed,
        "scan complete"
    );
    Ok(())
}

/// Sequentially take every candidate folder to a terminal state. Folder-level
/// failures are recorded and skipped; they never abort the run.
fn merge_tree(config: &Config) -> BbResult<RunSummary> {
    let merger = Merger::new(
        FfmpegConcat::new(config.tool.clone()),
        MergeConfig {
            extension: config.extension.clone(),
            pad_width: config.pad_width,
            keep_originals: config.keep_originals,
        },
    );

    let mut summary = RunSummary::default();
    for folder in candidate_folders(&config.root) {
        let record = match merger.process_folder(&folder) {
            Ok(outcome) => {
                log_outcome(&folder, &outcome);
                summary.observe(&outcome);
                FolderRecord::from_outcome(&folder, &outcome)
            }
            Err(error) => {
                tracing::error!(
                    folder = %folder.display(),
                    error = %error,
                    "folder skipped after scan failure"
                );
                summary.observe_error();
                FolderRecord::from_error(&folder, &error)
            }
        };
        if config.json {
            println!("{}", serde_json::to_string(&record)?);
        }
    }
    Ok(summary)
}

fn log_outcome(folder: &std::path::Path, outcome: &FolderOutcome) {
    match outcome {
        FolderOutcome::Skipped { segments } => {
            tracing::debug!(folder = %folder.display(), segments, "skipped");
        }
        FolderOutcome::Cleaned { segments, output } => {
            tracing::info!(
                folder = %folder.display(),
                segments,
                output = %output.display(),
                "merged and cleaned"
            );
        }
        FolderOutcome::Kept {
            segments,
            output,
            reason,
        } => match reason {
            KeepReason::Requested => {
                tracing::info!(
                    folder = %folder.display(),
                    segments,
                    output = %output.display(),
                    "merged, originals kept"
                );
            }
            // Failures were already logged by the merger with their detail.
            KeepReason::ToolFailed { .. } | KeepReason::ToolUnavailable { .. } => {}
        },
    }
}

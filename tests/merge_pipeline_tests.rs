//! End-to-end pipeline tests: walk a real directory tree and drive the
//! merger through a stand-in concat tool (a shell script), verifying the
//! cleanup policy against the filesystem.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use bookbind::walk::candidate_folders;
use bookbind::{FfmpegConcat, FolderOutcome, KeepReason, MergeConfig, Merger};

/// Write an executable script that creates the file named by its last
/// argument (the output path), records its arguments next to it, and exits
/// with `code`.
fn fake_tool(dir: &Path, code: i32) -> PathBuf {
    let script = dir.join("fake-ffmpeg");
    let body = format!(
        "#!/bin/sh\n\
         out=\"\"\n\
         for arg in \"$@\"; do out=\"$arg\"; done\n\
         printf '%s\\n' \"$@\" > \"${{out}}.args\"\n\
         : > \"$out\"\n\
         exit {code}\n"
    );
    fs::write(&script, body).expect("write fake tool");
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).expect("chmod");
    script
}

fn seed_folder(root: &Path, name: &str, files: &[&str]) -> PathBuf {
    let folder = root.join(name);
    fs::create_dir_all(&folder).expect("mkdir");
    for file in files {
        fs::write(folder.join(file), b"segment").expect("write fixture");
    }
    folder
}

fn merger(tool: PathBuf, keep_originals: bool) -> Merger<FfmpegConcat> {
    Merger::new(
        FfmpegConcat::new(tool),
        MergeConfig {
            extension: "mp3".to_owned(),
            pad_width: 3,
            keep_originals,
        },
    )
}

#[test]
fn merges_every_folder_in_the_tree_and_cleans_sources() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let tool = fake_tool(tmp.path(), 0);
    let root = tmp.path().join("library");
    let book1 = seed_folder(&root, "Book1", &["01.mp3", "02.mp3", "readme.txt"]);
    let book2 = seed_folder(&root, "Book2", &["intro.mp3", "outro.mp3"]);

    let merger = merger(tool, false);
    for folder in candidate_folders(&root) {
        merger.process_folder(&folder).expect("process folder");
    }

    assert!(book1.join("Book1.mp3").exists(), "output written");
    assert!(book2.join("Book2.mp3").exists(), "output written");
    assert!(!book1.join("01.mp3").exists(), "sources deleted");
    assert!(!book1.join("02.mp3").exists(), "sources deleted");
    assert!(book1.join("readme.txt").exists(), "non-audio untouched");
}

#[test]
fn invocation_orders_segments_naturally_in_the_concat_argument() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let tool = fake_tool(tmp.path(), 0);
    let root = tmp.path().join("library");
    let book = seed_folder(
        &root,
        "Book",
        &["chapter 11.mp3", "chapter 2.mp3", "chapter 1.mp3"],
    );

    merger(tool, true)
        .process_folder(&book)
        .expect("process folder");

    let args = fs::read_to_string(book.join("Book.mp3.args")).expect("args recorded");
    let concat_arg = args
        .lines()
        .find(|line| line.starts_with("concat:"))
        .expect("concat protocol argument present");
    let ordered: Vec<_> = concat_arg
        .trim_start_matches("concat:")
        .split('|')
        .map(|path| Path::new(path).file_name().unwrap().to_str().unwrap())
        .collect();
    assert_eq!(ordered, ["chapter 1.mp3", "chapter 2.mp3", "chapter 11.mp3"]);

    assert!(
        args.lines().any(|line| line == "copy"),
        "stream copy requested: {args}"
    );
}

#[test]
fn failing_tool_leaves_the_folder_intact() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let tool = fake_tool(tmp.path(), 7);
    let root = tmp.path().join("library");
    let book = seed_folder(&root, "Book", &["01.mp3", "02.mp3"]);

    let outcome = merger(tool, false)
        .process_folder(&book)
        .expect("failure must not abort");

    assert!(matches!(
        outcome,
        FolderOutcome::Kept {
            reason: KeepReason::ToolFailed { code: 7 },
            ..
        }
    ));
    assert!(book.join("01.mp3").exists());
    assert!(book.join("02.mp3").exists());
}

#[test]
fn keep_originals_preserves_sources_after_a_successful_merge() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let tool = fake_tool(tmp.path(), 0);
    let root = tmp.path().join("library");
    let book = seed_folder(&root, "Book", &["01.mp3", "02.mp3"]);

    let outcome = merger(tool, true)
        .process_folder(&book)
        .expect("process folder");

    assert!(matches!(
        outcome,
        FolderOutcome::Kept {
            reason: KeepReason::Requested,
            ..
        }
    ));
    assert!(book.join("Book.mp3").exists());
    assert!(book.join("01.mp3").exists());
    assert!(book.join("02.mp3").exists());
}

#[test]
fn rerunning_after_a_cleaned_merge_is_a_no_op() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let tool = fake_tool(tmp.path(), 0);
    let root = tmp.path().join("library");
    let book = seed_folder(&root, "Book", &["01.mp3", "02.mp3"]);

    let merger = merger(tool, false);
    let first = merger.process_folder(&book).expect("first pass");
    assert!(matches!(first, FolderOutcome::Cleaned { segments: 2, .. }));

    // Only the merged output remains, and its name matches the folder, so
    // the second pass sees nothing to merge and deletes nothing.
    let second = merger.process_folder(&book).expect("second pass");
    assert_eq!(second, FolderOutcome::Skipped { segments: 0 });
    assert!(book.join("Book.mp3").exists(), "prior output protected");
}

#[test]
fn root_without_subfolders_is_processed_as_the_single_batch() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let tool = fake_tool(tmp.path(), 0);
    let root = tmp.path().join("flat");
    seed_folder(tmp.path(), "flat", &["01.mp3", "02.mp3"]);

    let folders = candidate_folders(&root);
    assert_eq!(folders, [root.clone()]);

    let merger = merger(tool, false);
    for folder in &folders {
        merger.process_folder(folder).expect("process folder");
    }
    assert!(root.join("flat.mp3").exists());
    assert!(!root.join("01.mp3").exists());
}

#[test]
fn unstartable_tool_is_a_per_folder_failure_not_a_crash() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let root = tmp.path().join("library");
    let book = seed_folder(&root, "Book", &["01.mp3", "02.mp3"]);

    let merger = merger(tmp.path().join("no-such-tool"), false);
    let outcome = merger.process_folder(&book).expect("must not abort the run");

    assert!(matches!(
        outcome,
        FolderOutcome::Kept {
            reason: KeepReason::ToolUnavailable { .. },
            ..
        }
    ));
    assert!(book.join("01.mp3").exists());
}

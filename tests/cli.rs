//! Integration tests for the `fsearch` binary.

mod fixtures;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Temp dir holding the sample path list and an isolated app data dir
fn setup() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let list = dir.path().join("paths.txt");
    fs::write(&list, fixtures::SAMPLE_LIST).expect("Failed to write path list");
    (dir, list)
}

/// Run fsearch with given args, returning (stdout, stderr, success)
fn run_fsearch(args: &[&str], data_home: &Path) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_fsearch"))
        .args(args)
        .env("XDG_DATA_HOME", data_home)
        .env("HOME", data_home)
        .env_remove("FSEARCH_THREADS")
        .env_remove("FSEARCH_LIMIT")
        .output()
        .expect("Failed to run fsearch");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}

fn search(extra: &[&str]) -> (String, String, bool) {
    let (dir, list) = setup();
    let mut args = vec!["search", "--list", list.to_str().unwrap()];
    args.extend_from_slice(extra);
    run_fsearch(&args, dir.path())
}

#[test]
fn test_plain_search() {
    let (out, err, ok) = search(&["img"]);
    assert!(ok, "fsearch failed: {}", err);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        vec![
            "/home/user/photos/img_042.jpg",
            "/home/user/photos/IMG_043.JPG",
            "2 results (0 folders, 2 files)",
        ]
    );
}

#[test]
fn test_folders_are_marked() {
    let (out, _, ok) = search(&["docs", "--filter", "folders"]);
    assert!(ok);
    assert!(out.starts_with("/home/user/docs/\n"), "{}", out);
    assert!(out.contains("1 results (1 folders, 0 files)"));
}

#[test]
fn test_regex_and_limit() {
    let (out, _, ok) = search(&["--regex", r"^im.*\.jpg$", "--limit", "1"]);
    assert!(ok);
    assert!(out.contains("/home/user/photos/img_042.jpg"));
    assert!(out.contains("1 results"));
}

#[test]
fn test_json_output() {
    let (out, err, ok) = search(&["--json", "--translit", "wendang"]);
    assert!(ok, "fsearch failed: {}", err);
    let json: serde_json::Value = serde_json::from_str(&out).expect("valid JSON");
    assert_eq!(json["files"], 1);
    assert_eq!(json["results"][0]["path"], "/home/user/docs/文档.txt");
}

#[test]
fn test_wildcards_flag() {
    let (out, _, ok) = search(&["*.jpg"]);
    assert!(ok);
    assert!(out.contains("0 results"), "{}", out);

    let (out, err, ok) = search(&["--wildcards", "*.jpg"]);
    assert!(ok, "fsearch failed: {}", err);
    assert!(out.contains("3 results (0 folders, 3 files)"), "{}", out);
}

#[test]
fn test_invalid_regex_is_empty_not_an_error() {
    let (out, _, ok) = search(&["--regex", "img_[0-9"]);
    assert!(ok);
    assert!(out.contains("0 results"));
}

#[test]
fn test_missing_list_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.txt");
    let (_, err, ok) = run_fsearch(&["search", "--list", missing.to_str().unwrap(), "x"], dir.path());
    assert!(!ok);
    assert!(err.contains("Failed to load path list"), "{}", err);
}

#[test]
fn test_config_command() {
    let dir = TempDir::new().unwrap();
    let (out, err, ok) = run_fsearch(&["config", "--save"], dir.path());
    assert!(ok, "fsearch config failed: {}", err);
    assert!(out.contains("\"worker_threads\": 0"));
    assert!(out.contains("# saved to"));
}

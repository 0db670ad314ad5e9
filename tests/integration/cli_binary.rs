//! Integration tests that run the treeshift binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

use crate::integration::build_tree;

fn treeshift(env_root: &Path, args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_treeshift");
    Command::new(bin)
        .env("XDG_STATE_HOME", env_root.join("state"))
        .env("XDG_CONFIG_HOME", env_root.join("config"))
        .env("HOME", env_root.join("home"))
        .env_remove("TREESHIFT_LOG")
        .env_remove("TREESHIFT_LOG_OUTPUT")
        .env("NO_COLOR", "1")
        .args(args)
        .stdin(Stdio::null())
        .output()
        .unwrap()
}

#[test]
fn test_binary_deletes_with_flags() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("src");
    build_tree(&root, &[("a/x.txt", "x"), ("b/y.csv", "y")], &[]);

    let source = root.to_str().unwrap();
    let args = ["--mode", "Delete", "--filter", "txt", "--source", source, "--yes", "--quiet"];
    let output = treeshift(temp_dir.path(), &args);

    assert!(
        output.status.success(),
        "treeshift should succeed: stderr={:?}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("File and Sub-Folder Deletion Completed"));
    assert!(!root.join("a").exists());
    assert!(root.join("b/y.csv").exists());
}

#[test]
fn test_binary_reads_answers_from_stdin_pipe() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("src");
    let destination = temp_dir.path().join("dst");
    build_tree(&root, &[("a/x.txt", "x")], &[]);

    let bin = env!("CARGO_BIN_EXE_treeshift");
    let mut child = Command::new(bin)
        .env("XDG_STATE_HOME", temp_dir.path().join("state"))
        .env("XDG_CONFIG_HOME", temp_dir.path().join("config"))
        .env("HOME", temp_dir.path().join("home"))
        .arg("--quiet")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    {
        use std::io::Write;
        let stdin = child.stdin.as_mut().unwrap();
        write!(stdin, "move\n*\n{}\n{}\nY\n", root.display(), destination.display()).unwrap();
    }
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    assert!(destination.join("a/x.txt").is_file());
    assert!(!root.join("a").exists());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("File and Sub-Folder Moving Completed"));
}

#[test]
fn test_binary_exits_non_zero_when_input_ends() {
    let temp_dir = TempDir::new().unwrap();
    let output = treeshift(temp_dir.path(), &["--quiet"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("An error occurred while reading input"));
}

#[test]
fn test_default_logging_writes_to_state_file() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("src");
    build_tree(&root, &[("x.txt", "x")], &[]);

    let source = root.to_str().unwrap();
    let args = ["--mode", "delete", "--filter", "txt", "--source", source, "--yes"];
    let output = treeshift(temp_dir.path(), &args);
    assert!(output.status.success());

    let log_path = temp_dir.path().join("state").join("treeshift").join("treeshift.log");
    assert!(log_path.exists(), "log file should exist at {}", log_path.display());
    let content = fs::read_to_string(&log_path).unwrap();
    assert!(content.contains("Treeshift starting"));
    assert!(content.contains("Tree mutation finished"));
}

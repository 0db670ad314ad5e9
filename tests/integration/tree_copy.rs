//! Integration tests for copy-by-extension with re-rooting

use std::fs;
use tempfile::TempDir;
use treeshift::tree::{Confirmation, ExtensionFilter, SkipReason, TreeMutator};

use crate::integration::{build_tree, snapshot};

#[test]
fn test_copy_reroots_matches_and_leaves_source_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("src");
    let destination = temp_dir.path().join("dst");
    build_tree(
        &root,
        &[("a/x.txt", "x"), ("a/y.csv", "y"), ("b/c/z.txt", "z"), ("top.txt", "t")],
        &[],
    );
    let before = snapshot(&root);

    let outcome = TreeMutator::new()
        .copy_matching(&"txt".parse().unwrap(), &root, &destination, Confirmation::Yes)
        .unwrap();
    let report = outcome.report().unwrap();

    assert_eq!(snapshot(&root), before, "copy must not alter the source tree");
    assert_eq!(fs::read_to_string(destination.join("a/x.txt")).unwrap(), "x");
    assert_eq!(fs::read_to_string(destination.join("b/c/z.txt")).unwrap(), "z");
    assert_eq!(fs::read_to_string(destination.join("top.txt")).unwrap(), "t");
    assert!(!destination.join("a/y.csv").exists());
    assert_eq!(report.files_mutated, 3);
}

#[test]
fn test_copy_creates_no_directories_without_matches() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("src");
    let destination = temp_dir.path().join("dst");
    build_tree(&root, &[("a/x.txt", "x"), ("b/only.csv", "c")], &["empty"]);

    TreeMutator::new()
        .copy_matching(&"txt".parse().unwrap(), &root, &destination, Confirmation::Yes)
        .unwrap();

    assert!(destination.join("a").is_dir());
    assert!(!destination.join("b").exists());
    assert!(!destination.join("empty").exists());
}

#[test]
fn test_copy_overwrites_existing_destination_files() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("src");
    let destination = temp_dir.path().join("dst");
    build_tree(&root, &[("a/x.txt", "new")], &[]);
    build_tree(&destination, &[("a/x.txt", "old"), ("a/other.txt", "kept")], &[]);

    TreeMutator::new()
        .copy_matching(&ExtensionFilter::All, &root, &destination, Confirmation::Yes)
        .unwrap();

    assert_eq!(fs::read_to_string(destination.join("a/x.txt")).unwrap(), "new");
    assert_eq!(fs::read_to_string(destination.join("a/other.txt")).unwrap(), "kept");
}

#[test]
fn test_copy_into_subdirectory_of_source_does_not_recurse() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("src");
    let destination = root.join("backup");
    build_tree(&root, &[("a/x.txt", "x")], &[]);

    let outcome = TreeMutator::new()
        .copy_matching(&"txt".parse().unwrap(), &root, &destination, Confirmation::Yes)
        .unwrap();

    let report = outcome.report().unwrap();
    assert!(destination.join("a/x.txt").is_file());
    assert!(!destination.join("backup").exists());
    assert_eq!(report.files_mutated, 1);
    // Created by this run, so there was nothing inside it to leave out
    assert!(report.skipped.is_empty());
}

#[test]
fn test_copy_reports_existing_files_under_nested_destination() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("src");
    let destination = root.join("a");
    build_tree(&root, &[("a/x.txt", "x"), ("y.txt", "y")], &[]);

    let outcome = TreeMutator::new()
        .copy_matching(&"txt".parse().unwrap(), &root, &destination, Confirmation::Yes)
        .unwrap();
    let report = outcome.report().unwrap();

    assert_eq!(fs::read_to_string(destination.join("y.txt")).unwrap(), "y");
    assert!(!destination.join("a").exists(), "the destination is never walked");
    assert_eq!(report.files_mutated, 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].path, destination);
    assert_eq!(report.skipped[0].reason, SkipReason::InsideDestination);
}

#[test]
fn test_copy_aborts_when_destination_is_a_file() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("src");
    let destination = temp_dir.path().join("dst");
    build_tree(&root, &[("a/x.txt", "x"), ("b/y.txt", "y")], &[]);
    fs::write(&destination, "in the way").unwrap();

    let outcome = TreeMutator::new()
        .copy_matching(&ExtensionFilter::All, &root, &destination, Confirmation::Yes)
        .unwrap();
    let report = outcome.report().unwrap();

    assert!(report.is_aborted());
    assert!(report.aborted.as_deref().unwrap().contains("a/x.txt"));
    assert_eq!(report.files_mutated, 0);
    assert_eq!(report.files_scanned, 1, "the walk stops at the first failure");
    assert_eq!(fs::read_to_string(&destination).unwrap(), "in the way");
}

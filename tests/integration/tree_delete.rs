//! Integration tests for delete-by-extension with empty-directory pruning

use std::fs;
use tempfile::TempDir;
use treeshift::tree::{Confirmation, ExtensionFilter, TreeMutator};

use crate::integration::{build_tree, snapshot};

fn txt() -> ExtensionFilter {
    "txt".parse().unwrap()
}

#[test]
fn test_delete_removes_matches_and_prunes_emptied_directories() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("src");
    build_tree(
        &root,
        &[("a/x.txt", "x"), ("a/y.csv", "y,1"), ("b/z.txt", "z")],
        &[],
    );

    let outcome = TreeMutator::new()
        .delete_matching(&txt(), &root, Confirmation::Yes)
        .unwrap();
    let report = outcome.report().unwrap();

    assert!(!root.join("a/x.txt").exists());
    assert_eq!(fs::read(root.join("a/y.csv")).unwrap(), b"y,1");
    assert!(!root.join("b").exists(), "b held only matches and must be pruned");
    assert!(root.join("a").is_dir(), "a still holds y.csv");
    assert!(root.is_dir(), "root is never pruned");

    assert_eq!(report.files_scanned, 3);
    assert_eq!(report.files_matched, 2);
    assert_eq!(report.files_mutated, 2);
    assert_eq!(report.directories_pruned, 1);
    assert!(report.is_clean());
}

#[test]
fn test_delete_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("src");
    build_tree(&root, &[("a/x.txt", "x"), ("a/keep.md", "# keep")], &[]);

    let mutator = TreeMutator::new();
    mutator.delete_matching(&txt(), &root, Confirmation::Yes).unwrap();
    let after_first = snapshot(&root);

    let outcome = mutator.delete_matching(&txt(), &root, Confirmation::Yes).unwrap();
    assert_eq!(snapshot(&root), after_first);
    assert_eq!(outcome.report().unwrap().files_mutated, 0);
}

#[test]
fn test_delete_leaves_non_matching_files_byte_identical() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("src");
    build_tree(
        &root,
        &[
            ("notes.txt", "drop"),
            ("data/report.csv", "a,b\n1,2\n"),
            ("data/deep/archive.TXT", "case differs"),
            ("data/deep/readme", "no extension"),
        ],
        &[],
    );
    let before = snapshot(&root);

    TreeMutator::new()
        .delete_matching(&txt(), &root, Confirmation::Yes)
        .unwrap();
    let after = snapshot(&root);

    for (path, contents) in &before {
        if path.to_string_lossy().ends_with(".txt") {
            assert!(!after.contains_key(path));
        } else {
            assert_eq!(after.get(path), Some(contents), "{} changed", path.display());
        }
    }
}

#[test]
fn test_delete_wildcard_empties_tree_but_keeps_root() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("src");
    build_tree(
        &root,
        &[("top.bin", "1"), ("a/b/c/leaf.log", "2")],
        &["empty/nested"],
    );

    let outcome = TreeMutator::new()
        .delete_matching(&ExtensionFilter::All, &root, Confirmation::Yes)
        .unwrap();

    assert!(root.is_dir());
    assert!(snapshot(&root).is_empty());
    // a/b/c, a/b, a, empty/nested, empty
    assert_eq!(outcome.report().unwrap().directories_pruned, 5);
}

#[test]
fn test_delete_missing_root_is_skipped_not_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("missing");

    let outcome = TreeMutator::new()
        .delete_matching(&txt(), &root, Confirmation::Yes)
        .unwrap();
    let report = outcome.report().unwrap();

    assert!(!report.is_aborted());
    assert_eq!(report.files_scanned, 0);
}

#[cfg(unix)]
#[test]
fn test_delete_skips_permission_denied_and_continues() {
    use std::os::unix::fs::PermissionsExt;
    use treeshift::tree::SkipReason;

    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("src");
    build_tree(
        &root,
        &[("locked/x.txt", "x"), ("open/y.txt", "y"), ("z.txt", "z")],
        &[],
    );
    let locked = root.join("locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

    // Permission bits do not bind a privileged user
    let canary = locked.join("canary");
    if fs::write(&canary, "").is_ok() {
        fs::remove_file(&canary).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let outcome = TreeMutator::new()
        .delete_matching(&txt(), &root, Confirmation::Yes)
        .unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    let report = outcome.report().unwrap();

    assert!(!report.is_aborted());
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].path, locked.join("x.txt"));
    assert_eq!(report.skipped[0].reason, SkipReason::PermissionDenied);

    assert!(locked.join("x.txt").exists());
    assert!(!root.join("open").exists(), "siblings after the failure are still processed");
    assert!(!root.join("z.txt").exists());
    assert_eq!(report.files_mutated, 2);
}

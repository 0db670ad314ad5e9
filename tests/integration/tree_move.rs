//! Integration tests for move-by-extension

use std::fs;
use tempfile::TempDir;
use treeshift::error::MutationError;
use treeshift::tree::{Confirmation, ExtensionFilter, TreeMutator};

use crate::integration::{build_tree, snapshot};

#[test]
fn test_move_relocates_matches_and_prunes_source() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("src");
    let destination = temp_dir.path().join("dst");
    build_tree(
        &root,
        &[("a/x.txt", "x"), ("a/y.csv", "y"), ("b/z.txt", "z")],
        &[],
    );

    let outcome = TreeMutator::new()
        .move_matching(&"txt".parse().unwrap(), &root, &destination, Confirmation::Yes)
        .unwrap();
    let report = outcome.report().unwrap();

    assert_eq!(fs::read_to_string(destination.join("a/x.txt")).unwrap(), "x");
    assert_eq!(fs::read_to_string(destination.join("b/z.txt")).unwrap(), "z");
    assert!(!root.join("a/x.txt").exists());
    assert!(root.join("a/y.csv").is_file());
    assert!(!root.join("b").exists());
    assert!(root.is_dir());
    assert_eq!(report.files_mutated, 2);
    assert_eq!(report.directories_pruned, 1);
}

#[test]
fn test_move_all_preserves_contents_and_layout() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("src");
    let destination = temp_dir.path().join("dst");
    build_tree(
        &root,
        &[("one.md", "1"), ("deep/er/two.rs", "fn main() {}"), ("deep/three", "3")],
        &[],
    );
    let before = snapshot(&root);

    TreeMutator::new()
        .move_matching(&ExtensionFilter::All, &root, &destination, Confirmation::Yes)
        .unwrap();

    assert!(snapshot(&root).is_empty());
    assert_eq!(snapshot(&destination), before);
}

#[test]
fn test_move_to_root_is_rejected_before_touching_files() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("src");
    build_tree(&root, &[("a/x.txt", "x")], &[]);
    let before = snapshot(&root);

    let err = TreeMutator::new()
        .move_matching(&ExtensionFilter::All, &root, &root, Confirmation::Yes)
        .unwrap_err();

    assert!(matches!(err, MutationError::DestinationIsRoot(_)));
    assert_eq!(snapshot(&root), before);
}

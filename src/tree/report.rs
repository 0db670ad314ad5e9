//! Per-run mutation summary

use crate::tree::filter::ExtensionFilter;
use crate::tree::mutator::MutationMode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Why an entry was left alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NotFound,
    PermissionDenied,
    /// Copy source is not a regular file (directory, FIFO, socket, device)
    NotAFile,
    /// Subtree occupied by a destination nested inside the source; never walked
    InsideDestination,
}

impl SkipReason {
    /// Failures that are logged and stepped over; anything else ends the run
    pub fn classify(kind: ErrorKind) -> Option<Self> {
        match kind {
            ErrorKind::NotFound => Some(SkipReason::NotFound),
            ErrorKind::PermissionDenied => Some(SkipReason::PermissionDenied),
            _ => None,
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotFound => f.write_str("File not found"),
            SkipReason::PermissionDenied => f.write_str("Permission denied"),
            SkipReason::NotAFile => f.write_str("Not a file"),
            SkipReason::InsideDestination => f.write_str("Inside destination"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedEntry {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// What a single run did to the tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationReport {
    pub mode: MutationMode,
    pub filter: String,
    pub root: PathBuf,
    pub destination: Option<PathBuf>,
    pub files_scanned: usize,
    pub files_matched: usize,
    pub files_mutated: usize,
    pub directories_created: usize,
    pub directories_pruned: usize,
    pub skipped: Vec<SkippedEntry>,
    /// Set when an unclassified failure ended the traversal early
    pub aborted: Option<String>,
}

impl MutationReport {
    pub fn new(
        mode: MutationMode,
        filter: &ExtensionFilter,
        root: PathBuf,
        destination: Option<PathBuf>,
    ) -> Self {
        Self {
            mode,
            filter: filter.to_string(),
            root,
            destination,
            files_scanned: 0,
            files_matched: 0,
            files_mutated: 0,
            directories_created: 0,
            directories_pruned: 0,
            skipped: Vec::new(),
            aborted: None,
        }
    }

    pub fn skip(&mut self, path: PathBuf, reason: SkipReason) {
        self.skipped.push(SkippedEntry { path, reason });
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.is_some()
    }

    /// No skipped entries and the walk ran to the end
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && !self.is_aborted()
    }
}

//! Tree mutator: delete, copy or move files by extension across a directory tree
//!
//! Every run walks the tree bottom-up. For each directory the matching files
//! are mutated first; for delete and move the directory itself is then
//! removed if that left it empty. The traversal root is never removed.
//!
//! Missing files and permission failures are logged and skipped. Any other
//! failure ends the traversal where it stands and is recorded on the report.

use crate::error::MutationError;
use crate::tree::filter::ExtensionFilter;
use crate::tree::path;
use crate::tree::report::{MutationReport, SkipReason};
use crate::tree::walker::{TraversalNode, Walker, WalkerConfig};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, error, info, warn};

/// Effect applied to matching files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MutationMode {
    Copy,
    Move,
    Delete,
}

impl MutationMode {
    pub const ALL: [MutationMode; 3] =
        [MutationMode::Copy, MutationMode::Move, MutationMode::Delete];

    pub fn needs_destination(self) -> bool {
        matches!(self, MutationMode::Copy | MutationMode::Move)
    }

    /// Whether directories emptied by the run are removed afterwards
    pub fn prunes(self) -> bool {
        matches!(self, MutationMode::Move | MutationMode::Delete)
    }

    /// "Copying", "Moving", "Deletion"
    pub fn noun(self) -> &'static str {
        match self {
            MutationMode::Copy => "Copying",
            MutationMode::Move => "Moving",
            MutationMode::Delete => "Deletion",
        }
    }

    pub fn past_tense(self) -> &'static str {
        match self {
            MutationMode::Copy => "Copied",
            MutationMode::Move => "Moved",
            MutationMode::Delete => "Deleted",
        }
    }
}

impl fmt::Display for MutationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MutationMode::Copy => "Copy",
            MutationMode::Move => "Move",
            MutationMode::Delete => "Delete",
        };
        f.write_str(name)
    }
}

impl FromStr for MutationMode {
    type Err = MutationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        MutationMode::ALL
            .into_iter()
            .find(|mode| mode.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| MutationError::InvalidMode(s.to_string()))
    }
}

/// Answer to the "are you sure" gate in front of every run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Yes,
    No,
}

impl Confirmation {
    pub fn is_affirmative(self) -> bool {
        self == Confirmation::Yes
    }
}

impl FromStr for Confirmation {
    type Err = MutationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Y" => Ok(Confirmation::Yes),
            "N" => Ok(Confirmation::No),
            other => Err(MutationError::InvalidConfirmation(other.to_string())),
        }
    }
}

/// Everything needed to run one mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRequest {
    pub mode: MutationMode,
    pub filter: ExtensionFilter,
    pub root: PathBuf,
    pub destination: Option<PathBuf>,
}

impl MutationRequest {
    pub fn new(
        mode: MutationMode,
        filter: ExtensionFilter,
        root: PathBuf,
        destination: Option<PathBuf>,
    ) -> Result<Self, MutationError> {
        let destination = if mode.needs_destination() {
            match destination {
                Some(dest) if !dest.as_os_str().is_empty() => Some(dest),
                _ => return Err(MutationError::MissingDestination(mode.to_string())),
            }
        } else {
            None
        };
        Ok(Self {
            mode,
            filter,
            root,
            destination,
        })
    }

    pub fn delete(filter: ExtensionFilter, root: PathBuf) -> Self {
        Self {
            mode: MutationMode::Delete,
            filter,
            root,
            destination: None,
        }
    }

    pub fn copy(filter: ExtensionFilter, root: PathBuf, destination: PathBuf) -> Self {
        Self {
            mode: MutationMode::Copy,
            filter,
            root,
            destination: Some(destination),
        }
    }

    pub fn relocate(filter: ExtensionFilter, root: PathBuf, destination: PathBuf) -> Self {
        Self {
            mode: MutationMode::Move,
            filter,
            root,
            destination: Some(destination),
        }
    }
}

/// A single file considered by a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationTarget {
    pub source: PathBuf,
    pub matched: bool,
    /// Full destination path for copy and move
    pub destination: Option<PathBuf>,
}

impl MutationTarget {
    pub fn new(
        node: &TraversalNode,
        name: &OsString,
        filter: &ExtensionFilter,
        destination_dir: Option<&Path>,
    ) -> Self {
        Self {
            source: node.file_path(name),
            matched: filter.matches(name),
            destination: destination_dir.map(|dir| dir.join(name)),
        }
    }
}

/// Result of a gated run
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Negative confirmation; the filesystem was not touched
    Cancelled,
    Completed(MutationReport),
}

impl Outcome {
    pub fn report(&self) -> Option<&MutationReport> {
        match self {
            Outcome::Cancelled => None,
            Outcome::Completed(report) => Some(report),
        }
    }
}

enum Applied {
    Mutated,
    Skipped(SkipReason),
}

/// Applies a [`MutationRequest`] to a directory tree
#[derive(Debug, Clone, Default)]
pub struct TreeMutator {
    walker: WalkerConfig,
}

impl TreeMutator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(walker: WalkerConfig) -> Self {
        Self { walker }
    }

    /// Remove every matching file under `root`, then prune emptied directories
    pub fn delete_matching(
        &self,
        filter: &ExtensionFilter,
        root: &Path,
        confirmation: Confirmation,
    ) -> Result<Outcome, MutationError> {
        let request = MutationRequest::delete(filter.clone(), root.to_path_buf());
        self.execute(&request, confirmation)
    }

    /// Copy every matching file under `root` to the same relative path under `destination`
    pub fn copy_matching(
        &self,
        filter: &ExtensionFilter,
        root: &Path,
        destination: &Path,
        confirmation: Confirmation,
    ) -> Result<Outcome, MutationError> {
        let request = MutationRequest::copy(
            filter.clone(),
            root.to_path_buf(),
            destination.to_path_buf(),
        );
        self.execute(&request, confirmation)
    }

    /// Move every matching file under `root` to the same relative path under
    /// `destination`, then prune emptied source directories
    pub fn move_matching(
        &self,
        filter: &ExtensionFilter,
        root: &Path,
        destination: &Path,
        confirmation: Confirmation,
    ) -> Result<Outcome, MutationError> {
        let request = MutationRequest::relocate(
            filter.clone(),
            root.to_path_buf(),
            destination.to_path_buf(),
        );
        self.execute(&request, confirmation)
    }

    /// Run a request behind its confirmation gate.
    ///
    /// Returns `Err` only for requests that cannot start (missing destination,
    /// destination equal to the root). Failures during the walk end up on the
    /// report instead.
    pub fn execute(
        &self,
        request: &MutationRequest,
        confirmation: Confirmation,
    ) -> Result<Outcome, MutationError> {
        if !confirmation.is_affirmative() {
            info!(mode = %request.mode, root = %request.root.display(), "Mutation cancelled");
            return Ok(Outcome::Cancelled);
        }

        let mut config = self.walker.clone();
        match (&request.destination, request.mode.needs_destination()) {
            (Some(destination), true) => {
                config.excluded = excluded_subtree(&request.root, destination)?;
            }
            (None, true) => {
                return Err(MutationError::MissingDestination(request.mode.to_string()));
            }
            (_, false) => {}
        }

        let destination = request
            .destination
            .clone()
            .filter(|_| request.mode.needs_destination());
        let mut report = MutationReport::new(
            request.mode,
            &request.filter,
            request.root.clone(),
            destination,
        );

        info!(
            mode = %request.mode,
            filter = %request.filter,
            root = %request.root.display(),
            destination = ?report.destination,
            "Starting tree mutation"
        );

        if let Some(relative) = &config.excluded {
            let excluded = request.root.join(relative);
            if excluded.is_dir() {
                warn!(
                    path = %excluded.display(),
                    "Destination lies inside the source; its existing contents are left alone"
                );
                report.skip(excluded, SkipReason::InsideDestination);
            }
        }

        let walker = Walker::with_config(request.root.clone(), config);
        for node in walker.walk() {
            let err = match node.and_then(|node| self.process_node(&node, request, &mut report)) {
                Ok(()) => continue,
                Err(err) => err,
            };
            if let MutationError::Walk { path, source } = &err {
                if let Some(reason) = SkipReason::classify(source.kind()) {
                    warn!(path = %path.display(), %reason, "Skipping unreadable directory");
                    report.skip(path.clone(), reason);
                    continue;
                }
            }
            error!(error = %err, "Tree mutation aborted");
            report.aborted = Some(err.to_string());
            break;
        }

        info!(
            scanned = report.files_scanned,
            matched = report.files_matched,
            mutated = report.files_mutated,
            skipped = report.skipped.len(),
            pruned = report.directories_pruned,
            aborted = report.is_aborted(),
            "Tree mutation finished"
        );
        Ok(Outcome::Completed(report))
    }

    /// Phase 1: mutate the directory's matching files. Phase 2: prune it.
    fn process_node(
        &self,
        node: &TraversalNode,
        request: &MutationRequest,
        report: &mut MutationReport,
    ) -> Result<(), MutationError> {
        let destination_dir = report
            .destination
            .as_deref()
            .map(|dest| path::reroot(dest, &node.relative));
        let mut destination_ready = false;

        for name in &node.files {
            report.files_scanned += 1;
            let target =
                MutationTarget::new(node, name, &request.filter, destination_dir.as_deref());
            if !target.matched {
                continue;
            }
            report.files_matched += 1;

            match apply(request.mode, &target, &mut destination_ready, report) {
                Ok(Applied::Mutated) => {
                    report.files_mutated += 1;
                    debug!(
                        path = %target.source.display(),
                        destination = ?target.destination,
                        "{}",
                        request.mode.past_tense()
                    );
                }
                Ok(Applied::Skipped(reason)) => {
                    warn!(path = %target.source.display(), %reason, "Skipping file");
                    report.skip(target.source, reason);
                }
                Err(err) => match SkipReason::classify(err.kind()) {
                    Some(reason) => {
                        warn!(path = %target.source.display(), %reason, "Skipping file");
                        report.skip(target.source, reason);
                    }
                    None => {
                        return Err(MutationError::File {
                            path: target.source,
                            source: err,
                        })
                    }
                },
            }
        }

        if request.mode.prunes() && !node.is_root() {
            prune(&node.path, report);
        }
        Ok(())
    }
}

fn apply(
    mode: MutationMode,
    target: &MutationTarget,
    destination_ready: &mut bool,
    report: &mut MutationReport,
) -> io::Result<Applied> {
    if mode == MutationMode::Delete {
        fs::remove_file(&target.source)?;
        return Ok(Applied::Mutated);
    }

    let Some(destination) = target.destination.as_deref() else {
        return Err(io::Error::new(
            ErrorKind::InvalidInput,
            "no destination computed for file",
        ));
    };

    // Reading a FIFO, socket or device would block or never end
    if mode == MutationMode::Copy && !fs::metadata(&target.source)?.is_file() {
        return Ok(Applied::Skipped(SkipReason::NotAFile));
    }

    if !*destination_ready {
        if let Some(dir) = destination.parent() {
            if ensure_dir(dir)? {
                report.directories_created += 1;
            }
        }
        *destination_ready = true;
    }

    match mode {
        MutationMode::Copy => {
            fs::copy(&target.source, destination)?;
            Ok(Applied::Mutated)
        }
        _ => relocate(&target.source, destination),
    }
}

/// Create `dir` and any missing parents. Returns whether anything was created;
/// an existing directory counts as success.
fn ensure_dir(dir: &Path) -> io::Result<bool> {
    if dir.is_dir() {
        return Ok(false);
    }
    match fs::create_dir_all(dir) {
        Ok(()) => {
            debug!(path = %dir.display(), "Created destination directory");
            Ok(true)
        }
        Err(err) if err.kind() == ErrorKind::AlreadyExists => Ok(false),
        Err(err) => Err(err),
    }
}

/// Rename, falling back to copy-then-remove when rename cannot work
/// (e.g. across filesystems). Only regular files take the fallback.
fn relocate(source: &Path, destination: &Path) -> io::Result<Applied> {
    match fs::rename(source, destination) {
        Ok(()) => Ok(Applied::Mutated),
        Err(err) if SkipReason::classify(err.kind()).is_some() => Err(err),
        Err(err) => {
            if !fs::metadata(source)?.is_file() {
                return Ok(Applied::Skipped(SkipReason::NotAFile));
            }
            debug!(
                source = %source.display(),
                error = %err,
                "Rename failed, falling back to copy and remove"
            );
            fs::copy(source, destination)?;
            fs::remove_file(source)?;
            Ok(Applied::Mutated)
        }
    }
}

/// Remove a directory if it is empty. Failure (not empty, gone, denied) is ignored.
fn prune(dir: &Path, report: &mut MutationReport) {
    match fs::remove_dir(dir) {
        Ok(()) => {
            report.directories_pruned += 1;
            debug!(path = %dir.display(), "Pruned empty directory");
        }
        Err(err) => debug!(path = %dir.display(), error = %err, "Directory kept"),
    }
}

/// Subtree of `root` that the destination occupies, if any.
fn excluded_subtree(root: &Path, destination: &Path) -> Result<Option<PathBuf>, MutationError> {
    let root_resolved = path::resolve(root)?;
    let destination_resolved = path::resolve(destination)?;
    if root_resolved == destination_resolved {
        return Err(MutationError::DestinationIsRoot(destination.to_path_buf()));
    }
    Ok(destination_resolved
        .strip_prefix(&root_resolved)
        .ok()
        .map(Path::to_path_buf))
}

//! Bottom-up directory walker
//!
//! Yields one [`TraversalNode`] per directory, deepest first, so that a
//! directory is only seen after everything beneath it has been handled.
//! The traversal root always comes last.

use crate::error::MutationError;
use crate::tree::path::relative_offset;
use std::collections::VecDeque;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, FilterEntry, WalkDir};

/// A directory being visited, with the names of its direct children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalNode {
    /// Path of the directory as reached from the traversal root
    pub path: PathBuf,
    /// Offset from the traversal root (empty for the root)
    pub relative: PathBuf,
    /// Non-directory children, sorted by name
    pub files: Vec<OsString>,
    /// Directory children, sorted by name
    pub directories: Vec<OsString>,
}

impl TraversalNode {
    pub fn is_root(&self) -> bool {
        self.relative.as_os_str().is_empty()
    }

    pub fn file_path(&self, name: &OsString) -> PathBuf {
        self.path.join(name)
    }
}

/// Walker configuration
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Whether to follow symbolic links (default: false, links are treated as files)
    pub follow_symlinks: bool,
    /// Directory or file names to skip entirely (e.g. ".git")
    pub ignore_patterns: Vec<String>,
    /// Subtree, relative to the root, that must not be visited
    pub excluded: Option<PathBuf>,
}

/// Filesystem walker rooted at a single directory
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            config: WalkerConfig::default(),
        }
    }

    /// Create a walker with custom configuration
    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Self {
        Self { root, config }
    }

    /// Start a lazy bottom-up walk. Directory listings are read as the walk
    /// descends, so files removed before their directory is reached are
    /// simply not listed.
    pub fn walk(&self) -> BottomUp {
        let ignore = self.config.ignore_patterns.clone();
        let excluded = self
            .config
            .excluded
            .as_ref()
            .filter(|rel| !rel.as_os_str().is_empty())
            .map(|rel| self.root.join(rel));

        let predicate: EntryPredicate = Box::new(move |entry: &DirEntry| {
            if entry.depth() == 0 {
                return true;
            }
            if excluded.as_deref() == Some(entry.path()) {
                return false;
            }
            let name = entry.file_name().to_string_lossy();
            !ignore.iter().any(|pattern| pattern.as_str() == name)
        });

        let inner = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(predicate);

        BottomUp {
            root: self.root.clone(),
            inner,
            open: Vec::new(),
            ready: VecDeque::new(),
            exhausted: false,
        }
    }
}

type EntryPredicate = Box<dyn FnMut(&DirEntry) -> bool>;

/// A directory entered by the walk whose subtree is not finished yet
#[derive(Debug)]
struct OpenDir {
    depth: usize,
    path: PathBuf,
    files: Vec<OsString>,
    directories: Vec<OsString>,
}

/// Iterator returned by [`Walker::walk`]
///
/// The underlying walk is pre-order; directories are held on a stack and
/// released once the walk moves back above their depth.
pub struct BottomUp {
    root: PathBuf,
    inner: FilterEntry<walkdir::IntoIter, EntryPredicate>,
    open: Vec<OpenDir>,
    ready: VecDeque<TraversalNode>,
    exhausted: bool,
}

impl BottomUp {
    fn visit(&mut self, entry: DirEntry) {
        let depth = entry.depth();
        self.close_to(depth);

        let is_dir = entry.file_type().is_dir();
        let path = entry.into_path();

        if let Some(parent) = self.open.last_mut() {
            let name = path
                .file_name()
                .map(OsStr::to_os_string)
                .unwrap_or_default();
            if is_dir {
                parent.directories.push(name);
            } else {
                parent.files.push(name);
            }
        }

        if is_dir {
            self.open.push(OpenDir {
                depth,
                path,
                files: Vec::new(),
                directories: Vec::new(),
            });
        }
    }

    /// Release every open directory at `depth` or deeper, deepest first
    fn close_to(&mut self, depth: usize) {
        while self.open.last().is_some_and(|dir| dir.depth >= depth) {
            let Some(dir) = self.open.pop() else { break };
            let relative = relative_offset(&self.root, &dir.path);
            self.ready.push_back(TraversalNode {
                path: dir.path,
                relative,
                files: dir.files,
                directories: dir.directories,
            });
        }
    }
}

impl Iterator for BottomUp {
    type Item = Result<TraversalNode, MutationError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.ready.pop_front() {
                return Some(Ok(node));
            }
            if self.exhausted {
                return None;
            }
            match self.inner.next() {
                Some(Ok(entry)) => self.visit(entry),
                Some(Err(err)) => return Some(Err(map_walk_error(err, &self.root))),
                None => {
                    self.exhausted = true;
                    self.close_to(0);
                }
            }
        }
    }
}

fn map_walk_error(err: walkdir::Error, root: &Path) -> MutationError {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.to_path_buf());
    if err.loop_ancestor().is_some() {
        return MutationError::SymlinkLoop(path);
    }
    match err.into_io_error() {
        Some(source) => MutationError::Walk { path, source },
        None => MutationError::SymlinkLoop(path),
    }
}

//! Path re-rooting and resolution utilities

use crate::error::MutationError;
use std::path::{Path, PathBuf};

/// Suffix of `dir` beyond `root`. Empty when `dir` is the root itself.
///
/// Falls back to an empty offset when `dir` is not under `root`.
pub fn relative_offset(root: &Path, dir: &Path) -> PathBuf {
    dir.strip_prefix(root)
        .map(Path::to_path_buf)
        .unwrap_or_default()
}

/// Map a directory offset under the traversal root onto the destination root.
///
/// Components are appended unchanged; an empty offset maps to `dest_root` itself.
pub fn reroot(dest_root: &Path, relative: &Path) -> PathBuf {
    if relative.as_os_str().is_empty() {
        dest_root.to_path_buf()
    } else {
        dest_root.join(relative)
    }
}

/// Resolve a path that may not exist yet to an absolute, symlink-free form.
///
/// The deepest existing ancestor is canonicalized with `dunce` and the
/// missing tail is appended as-is. Only used to compare source and
/// destination, never to build the paths that get mutated.
pub fn resolve(path: &Path) -> Result<PathBuf, MutationError> {
    let absolute = std::path::absolute(path).map_err(|e| MutationError::File {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut existing = absolute.as_path();
    let mut tail = Vec::new();
    while !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                tail.push(name.to_os_string());
                existing = parent;
            }
            _ => break,
        }
    }

    let mut resolved = dunce::canonicalize(existing).map_err(|e| MutationError::File {
        path: existing.to_path_buf(),
        source: e,
    })?;
    for name in tail.into_iter().rev() {
        resolved.push(name);
    }
    Ok(resolved)
}

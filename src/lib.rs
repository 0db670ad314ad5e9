//! Treeshift: batch file mutation across a directory tree
//!
//! Copies, moves or deletes every file with a given extension under a source
//! directory. Copy and move keep the relative layout under a destination;
//! delete and move remove directories they leave empty, never the source
//! directory itself.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod tree;

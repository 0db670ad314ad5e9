//! Directory tree batch mutation
//!
//! Walks a directory subtree bottom-up and deletes, copies or moves the files
//! selected by an extension filter, re-rooting copied and moved files under a
//! destination directory with the same relative layout.

pub mod filter;
pub mod mutator;
pub mod path;
pub mod report;
pub mod walker;

pub use filter::ExtensionFilter;
pub use mutator::{
    Confirmation, MutationMode, MutationRequest, MutationTarget, Outcome, TreeMutator,
};
pub use report::{MutationReport, SkipReason, SkippedEntry};
pub use walker::{TraversalNode, Walker, WalkerConfig};

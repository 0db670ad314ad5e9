//! Integration tests for the treeshift batch file mutator

mod cli_binary;
mod tree_copy;
mod tree_delete;
mod tree_move;

pub use test_utils::{build_tree, snapshot, with_xdg_env};

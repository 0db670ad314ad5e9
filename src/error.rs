//! Error types for the treeshift batch file mutator.

use std::path::PathBuf;
use thiserror::Error;

/// Tree-level errors raised while walking or mutating a directory tree
#[derive(Debug, Error)]
pub enum MutationError {
    #[error("Failed to walk {path:?}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to process {path:?}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Symbolic link loop detected at {0:?}")]
    SymlinkLoop(PathBuf),

    #[error("Destination {0:?} is the same directory as the source")]
    DestinationIsRoot(PathBuf),

    #[error("{0} requires a destination directory")]
    MissingDestination(String),

    #[error("Invalid extension filter: {0}")]
    InvalidFilter(String),

    #[error("Invalid action: {0:?}. Please enter 'Copy', 'Move', or 'Delete'.")]
    InvalidMode(String),

    #[error("Invalid confirmation: {0:?}. Please enter 'Y' or 'N'.")]
    InvalidConfirmation(String),
}

/// Session-level errors surfaced by the CLI
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to get user input: {0}")]
    Prompt(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Mutation(#[from] MutationError),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<dialoguer::Error> for ApiError {
    fn from(err: dialoguer::Error) -> Self {
        ApiError::Prompt(err.to_string())
    }
}

//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{ApiError, MutationError};

/// Map session errors to the line printed on stderr.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::Prompt(_) => format!("An error occurred while reading input: {}", e),
        ApiError::Mutation(MutationError::DestinationIsRoot(_)) => {
            format!("An error occurred while executing the action: {}", e)
        }
        _ => e.to_string(),
    }
}

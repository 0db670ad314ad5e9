//! Config facade: single entry point that assembles every source in order.

use super::merge_policy::builder_with_defaults;
use super::sources::{environment, global_file};
use super::TreeshiftConfig;
use crate::error::ApiError;
use config::File;
use std::path::Path;

/// Loads [`TreeshiftConfig`] from defaults, files and environment.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults, then the global config file, then `TREESHIFT__*` variables.
    pub fn load() -> Result<TreeshiftConfig, ApiError> {
        Self::build(None)
    }

    /// Like [`ConfigLoader::load`], with `path` layered over the global file.
    /// The file must exist.
    pub fn load_from_file(path: &Path) -> Result<TreeshiftConfig, ApiError> {
        if !path.is_file() {
            return Err(ApiError::ConfigError(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        Self::build(Some(path))
    }

    /// Load and validate, joining every validation failure into one error.
    pub fn load_validated(path: Option<&Path>) -> Result<TreeshiftConfig, ApiError> {
        let config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::load()?,
        };
        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(config)
    }

    fn build(explicit: Option<&Path>) -> Result<TreeshiftConfig, ApiError> {
        let mut builder = builder_with_defaults()?;
        builder = global_file::add_to_builder(builder)?;
        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = environment::add_to_builder(builder);

        let config = builder.build()?.try_deserialize::<TreeshiftConfig>()?;
        Ok(config)
    }
}

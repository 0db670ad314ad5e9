//! Configuration System
//!
//! Layered configuration for the treeshift CLI: built-in defaults, the global
//! config file, an optional explicit config file and `TREESHIFT__*` environment
//! variables, merged with the `config` crate.

use crate::logging::{self, LoggingConfig};
use crate::tree::WalkerConfig;
use serde::{Deserialize, Serialize};

mod facade;
mod merge_policy;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Report formats the session can print
pub const OUTPUT_FORMATS: &[&str] = &["text", "json"];

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreeshiftConfig {
    /// Traversal settings
    #[serde(default)]
    pub walker: WalkerSettings,

    /// Interactive session settings
    #[serde(default)]
    pub session: SessionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Traversal settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalkerSettings {
    /// Follow symbolic links into linked directories
    #[serde(default)]
    pub follow_symlinks: bool,

    /// File or directory names never visited (e.g. ".git")
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
}

impl WalkerSettings {
    pub fn to_walker_config(&self) -> WalkerConfig {
        WalkerConfig {
            follow_symlinks: self.follow_symlinks,
            ignore_patterns: self.ignore_patterns.clone(),
            excluded: None,
        }
    }
}

/// Interactive session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Wait for Enter before the process exits
    #[serde(default = "default_true")]
    pub pause_on_exit: bool,

    /// Report format: text or json
    #[serde(default = "default_output_format")]
    pub output_format: String,

    /// Non-zero exit code when files were skipped or the run was aborted
    #[serde(default)]
    pub strict_exit: bool,
}

fn default_true() -> bool {
    true
}

fn default_output_format() -> String {
    "text".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            pause_on_exit: default_true(),
            output_format: default_output_format(),
            strict_exit: false,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Walker(String),
    Session(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Walker(msg) => write!(f, "Walker: {}", msg),
            ValidationError::Session(msg) => write!(f, "Session: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !OUTPUT_FORMATS.contains(&self.output_format.as_str()) {
            return Err(format!(
                "Invalid output format: {} (must be 'text' or 'json')",
                self.output_format
            ));
        }
        Ok(())
    }
}

impl TreeshiftConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self
            .walker
            .ignore_patterns
            .iter()
            .any(|pattern| pattern.trim().is_empty())
        {
            errors.push(ValidationError::Walker(
                "Ignore patterns cannot be empty".to_string(),
            ));
        }

        if let Err(e) = self.session.validate() {
            errors.push(ValidationError::Session(e));
        }

        if let Err(e) = logging::validate(&self.logging) {
            errors.push(ValidationError::Logging(e.to_string()));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

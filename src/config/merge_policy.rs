//! Merge rules: defaults, override order, conflict handling.

use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("walker.follow_symlinks", false)?
        .set_default("session.pause_on_exit", true)?
        .set_default("session.output_format", "text")?
        .set_default("session.strict_exit", false)
}

//! Environment source: `TREESHIFT__SECTION__KEY=value`, e.g. `TREESHIFT__SESSION__STRICT_EXIT=true`

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

/// Add the environment source; it takes precedence over every file source.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("TREESHIFT")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("walker.ignore_patterns"),
    )
}

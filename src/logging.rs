//! Logging System
//!
//! Structured logging using the `tracing` crate. Level, format and destination
//! come from the configuration file, `TREESHIFT_LOG*` environment variables and
//! CLI flags, applied in that order.

use crate::error::ApiError;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Master switch (`--quiet` turns it off)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level or filter directive: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, stderr, file, file+stderr
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path (if output includes "file"); resolved under the state dir when unset
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Enable colored output (text format only, stdout/stderr only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Module-specific log levels
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "file".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_true(),
            modules: HashMap::new(),
        }
    }
}

impl LoggingConfig {
    /// Overlay `TREESHIFT_LOG`, `TREESHIFT_LOG_FORMAT`, `TREESHIFT_LOG_OUTPUT`
    /// and `TREESHIFT_LOG_MODULES` onto this config.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(level) = std::env::var("TREESHIFT_LOG") {
            if !level.trim().is_empty() {
                self.level = level;
            }
        }
        if let Ok(format) = std::env::var("TREESHIFT_LOG_FORMAT") {
            if format == "json" || format == "text" {
                self.format = format;
            }
        }
        if let Ok(output) = std::env::var("TREESHIFT_LOG_OUTPUT") {
            if parse_output_destinations(&output).is_ok() {
                self.output = output;
            }
        }
        if let Ok(modules) = std::env::var("TREESHIFT_LOG_MODULES") {
            for module_spec in modules.split(',') {
                if let Some((module, level)) = module_spec.split_once('=') {
                    self.modules
                        .insert(module.trim().to_string(), level.trim().to_string());
                }
            }
        }
    }

    pub fn uses_file(&self) -> bool {
        parse_output_destinations(&self.output)
            .map(|out| out.file)
            .unwrap_or(false)
    }
}

/// Default log file: `<state dir>/treeshift.log` (e.g. `$XDG_STATE_HOME/treeshift/treeshift.log`)
pub fn default_log_file_path() -> Result<PathBuf, ApiError> {
    let dirs = ProjectDirs::from("", "", "treeshift").ok_or_else(|| {
        ApiError::ConfigError("Could not determine a home directory for logs".to_string())
    })?;
    let base = dirs
        .state_dir()
        .unwrap_or_else(|| dirs.data_local_dir())
        .to_path_buf();
    Ok(base.join("treeshift.log"))
}

/// Pick the log file: CLI flag, then config file value, then the default location.
pub fn resolve_log_file_path(
    cli_file: Option<PathBuf>,
    config_file: Option<PathBuf>,
) -> Result<PathBuf, ApiError> {
    match cli_file.or(config_file) {
        Some(path) => Ok(path),
        None => default_log_file_path(),
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Initialize the logging system. A disabled config installs nothing.
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), ApiError> {
    let config = config.cloned().unwrap_or_default();
    if !config.enabled {
        return Ok(());
    }

    let filter = build_env_filter(&config)?;
    let format = determine_format(&config)?;
    let output = parse_output_destinations(&config.output)?;

    let mut layers: Vec<BoxedLayer> = Vec::new();
    if output.stdout {
        layers.push(build_layer(&format, std::io::stdout, config.color));
    }
    if output.stderr {
        layers.push(build_layer(&format, std::io::stderr, config.color));
    }
    if output.file {
        let file = open_log_file(&config)?;
        layers.push(build_layer(&format, Mutex::new(file), false));
    }

    Registry::default()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| ApiError::ConfigError(format!("Failed to install logger: {}", e)))
}

fn build_layer<W>(format: &str, writer: W, ansi: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    if format == "json" {
        fmt::layer()
            .json()
            .with_target(true)
            .with_timer(ChronoUtc::rfc_3339())
            .with_writer(writer)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_timer(ChronoUtc::rfc_3339())
            .with_ansi(ansi)
            .with_writer(writer)
            .boxed()
    }
}

fn open_log_file(config: &LoggingConfig) -> Result<std::fs::File, ApiError> {
    let log_file = match &config.file {
        Some(path) => path.clone(),
        None => default_log_file_path()?,
    };
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ApiError::ConfigError(format!("Failed to create log directory: {}", e))
        })?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .map_err(|e| {
            ApiError::ConfigError(format!("Failed to open log file {:?}: {}", log_file, e))
        })
}

/// Build the filter from the level directive plus module-specific levels
fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, ApiError> {
    if config.level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut filter = EnvFilter::try_new(&config.level)
        .map_err(|e| ApiError::ConfigError(format!("Invalid log level: {}", e)))?;

    let mut modules: Vec<_> = config.modules.iter().collect();
    modules.sort();
    for (module, module_level) in modules {
        let directive = format!("{}={}", module, module_level);
        filter = filter.add_directive(
            directive
                .parse()
                .map_err(|e| ApiError::ConfigError(format!("Invalid log directive: {}", e)))?,
        );
    }

    Ok(filter)
}

fn determine_format(config: &LoggingConfig) -> Result<String, ApiError> {
    match config.format.as_str() {
        "json" | "text" => Ok(config.format.clone()),
        other => Err(ApiError::ConfigError(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            other
        ))),
    }
}

/// Output destinations
#[derive(Debug, PartialEq, Eq)]
struct OutputDestinations {
    stdout: bool,
    stderr: bool,
    file: bool,
}

fn parse_output_destinations(output: &str) -> Result<OutputDestinations, ApiError> {
    let (stdout, stderr, file) = match output {
        "stdout" => (true, false, false),
        "stderr" => (false, true, false),
        "file" => (false, false, true),
        "file+stderr" => (false, true, true),
        _ => {
            return Err(ApiError::ConfigError(format!(
                "Invalid log output: {} (must be 'stdout', 'stderr', 'file', or 'file+stderr')",
                output
            )))
        }
    };
    Ok(OutputDestinations {
        stdout,
        stderr,
        file,
    })
}

/// Validate a logging section without installing anything
pub fn validate(config: &LoggingConfig) -> Result<(), ApiError> {
    determine_format(config)?;
    parse_output_destinations(&config.output)?;
    build_env_filter(config)?;
    Ok(())
}

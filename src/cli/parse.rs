//! CLI parse: clap types for treeshift. No behavior; definitions only.

use clap::Parser;
use std::path::PathBuf;

/// Treeshift CLI - copy, move or delete files by extension across a directory tree.
///
/// Every answer can be supplied up front with a flag; anything left out (or
/// invalid) is asked for interactively.
#[derive(Parser, Debug, Default)]
#[command(name = "treeshift")]
#[command(about = "Copy, move or delete files by extension across a directory tree")]
pub struct Cli {
    /// Action to perform: Copy, Move or Delete (case-insensitive)
    #[arg(long)]
    pub mode: Option<String>,

    /// File extension to act on, or "*" for all files
    #[arg(long)]
    pub filter: Option<String>,

    /// Directory to act on (must exist)
    #[arg(long)]
    pub source: Option<String>,

    /// Destination directory for Copy and Move (created as needed)
    #[arg(long)]
    pub destination: Option<String>,

    /// Answer "Y" to the confirmation prompt
    #[arg(long)]
    pub yes: bool,

    /// Report format (text or json)
    #[arg(long)]
    pub format: Option<String>,

    /// Exit without waiting for Enter
    #[arg(long)]
    pub no_pause: bool,

    /// Exit non-zero when files were skipped (2) or the run was aborted (1)
    #[arg(long)]
    pub strict: bool,

    /// Configuration file path (layered over the global config)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Debug logging, mirrored to stderr
    #[arg(long)]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

//! Treeshift CLI Binary
//!
//! Interactive front end for copying, moving or deleting files by extension.

use anyhow::Context;
use clap::Parser;
use std::io::{self, IsTerminal};
use std::process;
use tracing::{error, info};
use treeshift::cli::{Cli, DialoguerPrompter, LinePrompter, Prompter, RunContext, EXIT_PROMPT};
use treeshift::config::ConfigLoader;
use treeshift::logging::{init_logging, LoggingConfig};

fn main() {
    let cli = Cli::parse();

    // Build logging config from CLI args, env vars, and config file
    let logging_config = build_logging_config(&cli);

    // Initialize logging early
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Treeshift starting");

    match run(&cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            error!("Session failed: {:#}", e);
            eprintln!("{:#}", e);
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    let config = ConfigLoader::load_validated(cli.config.as_deref())
        .context("Failed to load configuration")?;
    let context = RunContext::new(config);
    info!("CLI context initialized");

    let interactive = io::stdin().is_terminal();
    let mut prompter: Box<dyn Prompter> = if interactive {
        Box::new(DialoguerPrompter)
    } else {
        Box::new(LinePrompter::new(io::stdin().lock(), io::stdout()))
    };

    let result = match context.run(cli, prompter.as_mut()) {
        Ok(result) => result,
        Err(e) => {
            error!("Session ended early: {}", e);
            eprintln!("{}", treeshift::cli::map_error(&e));
            pause(&context, cli, interactive, prompter.as_mut());
            return Ok(1);
        }
    };

    println!("{}", result.output);
    info!(mode = %result.request.mode, "Session finished");

    pause(&context, cli, interactive, prompter.as_mut());
    Ok(result.exit_code(context.strict_exit(cli)))
}

/// Keep a double-clicked console window open until Enter is pressed
fn pause(context: &RunContext, cli: &Cli, interactive: bool, prompter: &mut dyn Prompter) {
    if interactive && context.should_pause(cli) {
        if let Err(e) = prompter.acknowledge(EXIT_PROMPT) {
            error!("Exit prompt failed: {}", e);
        }
    }
}

/// Build logging configuration from CLI args, environment, and config file.
/// Precedence: CLI flags override environment override config file override defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let loaded = match cli.config {
        Some(ref config_path) => ConfigLoader::load_from_file(config_path),
        None => ConfigLoader::load(),
    };
    let mut config = loaded.ok().map(|c| c.logging).unwrap_or_default();
    config.apply_env_overrides();

    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
        // An explicit --log-output value still takes precedence below.
        if config.output == "file" {
            config.output = "file+stderr".to_string();
        }
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }

    if config.enabled && config.uses_file() {
        let resolved =
            treeshift::logging::resolve_log_file_path(cli.log_file.clone(), config.file.clone());
        if let Ok(path) = resolved {
            config.file = Some(path);
        }
    } else if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }

    config
}

//! CLI route: run context for one interactive session.
//!
//! Gathers the request (mode, filter, source, destination), passes the
//! confirmation gate, runs the tree mutator and renders the result. Nothing
//! here exits the process; the binary decides what to do with the result.

use crate::cli::parse::Cli;
use crate::cli::presentation;
use crate::cli::prompt::{Prompter, Validator};
use crate::config::{TreeshiftConfig, OUTPUT_FORMATS};
use crate::error::ApiError;
use crate::tree::path::resolve;
use crate::tree::{
    Confirmation, ExtensionFilter, MutationMode, MutationReport, MutationRequest, Outcome,
    TreeMutator,
};
use std::path::{Path, PathBuf};
use tracing::{error, info};

const SOURCE_MISSING: &str = "Directory does not exist. Please enter a valid directory.";
const DESTINATION_MISSING: &str = "Destination directory cannot be empty.";
const DESTINATION_IS_SOURCE: &str = "Destination must be a different directory than the source.";

/// How a session ended
#[derive(Debug, Clone)]
pub enum SessionOutcome {
    Completed(MutationReport),
    Cancelled,
    /// The mutator refused to start; nothing was changed
    Failed(String),
}

/// Result of [`RunContext::run`]
#[derive(Debug, Clone)]
pub struct SessionResult {
    pub request: MutationRequest,
    pub outcome: SessionOutcome,
    /// Rendered report and completion or cancellation message
    pub output: String,
}

impl SessionResult {
    /// 0 unless `strict`; then 2 for skipped files and 1 for aborted or failed runs
    pub fn exit_code(&self, strict: bool) -> i32 {
        if !strict {
            return 0;
        }
        match &self.outcome {
            SessionOutcome::Completed(report) if report.is_aborted() => 1,
            SessionOutcome::Completed(report) if !report.skipped.is_empty() => 2,
            SessionOutcome::Failed(_) => 1,
            _ => 0,
        }
    }
}

/// Runtime context for CLI execution: effective configuration and the mutator.
pub struct RunContext {
    config: TreeshiftConfig,
    mutator: TreeMutator,
}

impl RunContext {
    pub fn new(config: TreeshiftConfig) -> Self {
        let mutator = TreeMutator::with_config(config.walker.to_walker_config());
        Self { config, mutator }
    }

    /// Whether the binary should wait for Enter before exiting
    pub fn should_pause(&self, cli: &Cli) -> bool {
        self.config.session.pause_on_exit && !cli.no_pause
    }

    pub fn strict_exit(&self, cli: &Cli) -> bool {
        cli.strict || self.config.session.strict_exit
    }

    /// Run one full session against `prompter`.
    pub fn run(&self, cli: &Cli, prompter: &mut dyn Prompter) -> Result<SessionResult, ApiError> {
        let format = cli
            .format
            .clone()
            .unwrap_or_else(|| self.config.session.output_format.clone());
        if !OUTPUT_FORMATS.contains(&format.as_str()) {
            return Err(ApiError::InvalidInput(format!(
                "Unknown output format: {} (must be 'text' or 'json')",
                format
            )));
        }

        let request = self.gather_request(cli, prompter)?;
        info!(
            mode = %request.mode,
            filter = %request.filter,
            root = %request.root.display(),
            "Request gathered"
        );

        let confirmation = self.confirm(&request, cli.yes, prompter)?;
        if confirmation.is_affirmative() {
            prompter.notify(&presentation::start_message(&request))?;
        }

        let outcome = match self.mutator.execute(&request, confirmation) {
            Ok(Outcome::Completed(report)) => SessionOutcome::Completed(report),
            Ok(Outcome::Cancelled) => SessionOutcome::Cancelled,
            Err(err) => {
                error!(error = %err, "Mutation could not start");
                SessionOutcome::Failed(err.to_string())
            }
        };

        let color = format == "text"
            && self.config.logging.color
            && std::env::var_os("NO_COLOR").is_none();
        let output = presentation::format_session(request.mode, &outcome, &format, color)?;
        Ok(SessionResult {
            request,
            outcome,
            output,
        })
    }

    /// Ask for each part of the request in order, using pre-filled flags where valid.
    pub fn gather_request(
        &self,
        cli: &Cli,
        prompter: &mut dyn Prompter,
    ) -> Result<MutationRequest, ApiError> {
        let mode: MutationMode = answer(
            prompter,
            cli.mode.as_deref(),
            "Copy, Move or Delete",
            &|s| s.parse::<MutationMode>().map(|_| ()).map_err(|e| e.to_string()),
        )?
        .parse()?;

        let filter: ExtensionFilter = answer(
            prompter,
            cli.filter.as_deref(),
            "File Type (\"*\" for all files)",
            &|s| s.parse::<ExtensionFilter>().map(|_| ()).map_err(|e| e.to_string()),
        )?
        .parse()?;

        let source = answer(
            prompter,
            cli.source.as_deref(),
            &format!("Directory to {} from", mode),
            &validate_source,
        )?;
        let root = PathBuf::from(source);

        let destination = if mode.needs_destination() {
            let validate = |s: &str| validate_destination(&root, s);
            let destination = answer(
                prompter,
                cli.destination.as_deref(),
                &format!("Directory to {} to", mode),
                &validate,
            )?;
            Some(PathBuf::from(destination))
        } else {
            None
        };

        Ok(MutationRequest::new(mode, filter, root, destination)?)
    }

    /// Show what is about to happen and ask for Y/N (skipped with `--yes`)
    pub fn confirm(
        &self,
        request: &MutationRequest,
        assume_yes: bool,
        prompter: &mut dyn Prompter,
    ) -> Result<Confirmation, ApiError> {
        prompter.notify(&presentation::confirmation_preamble(request))?;
        if assume_yes {
            return Ok(Confirmation::Yes);
        }
        let reply = prompter.ask("Y or N?", &|s| {
            s.parse::<Confirmation>().map(|_| ()).map_err(|e| e.to_string())
        })?;
        Ok(reply.parse()?)
    }
}

/// Use a pre-filled answer if it validates; otherwise report why and prompt.
fn answer(
    prompter: &mut dyn Prompter,
    prefilled: Option<&str>,
    prompt: &str,
    validate: Validator<'_>,
) -> Result<String, ApiError> {
    if let Some(value) = prefilled {
        match validate(value) {
            Ok(()) => return Ok(value.trim().to_string()),
            Err(message) => prompter.notify(&message)?,
        }
    }
    prompter.ask(prompt, validate)
}

fn validate_source(s: &str) -> Result<(), String> {
    let s = s.trim();
    if !s.is_empty() && Path::new(s).is_dir() {
        Ok(())
    } else {
        Err(SOURCE_MISSING.to_string())
    }
}

fn validate_destination(root: &Path, s: &str) -> Result<(), String> {
    let s = s.trim();
    if s.is_empty() {
        return Err(DESTINATION_MISSING.to_string());
    }
    match (resolve(root), resolve(Path::new(s))) {
        (Ok(a), Ok(b)) if a == b => Err(DESTINATION_IS_SOURCE.to_string()),
        _ => Ok(()),
    }
}

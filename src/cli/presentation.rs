//! Presentation: user-facing messages and report formatting (text or json).

use crate::cli::route::SessionOutcome;
use crate::error::ApiError;
use crate::tree::{MutationMode, MutationReport, MutationRequest};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

pub fn confirmation_preamble(request: &MutationRequest) -> String {
    let mut s = format!(
        "\nAre you sure that you want to {} all files with the file type: {}\n\
         from: {} and all sub-folders",
        request.mode,
        request.filter.label(),
        request.root.display()
    );
    if let Some(destination) = &request.destination {
        s.push_str(&format!("\nto: {}", destination.display()));
    }
    s
}

pub fn start_message(request: &MutationRequest) -> String {
    let mut s = format!(
        "Files with file type {} will now be {} from:\n{}",
        request.filter.label(),
        request.mode.past_tense(),
        request.root.display()
    );
    if let Some(destination) = &request.destination {
        s.push_str(&format!(" to {}", destination.display()));
    }
    s
}

pub fn completion_message(mode: MutationMode) -> String {
    format!("File and Sub-Folder {} Completed", mode.noun())
}

pub fn cancellation_message(mode: MutationMode) -> String {
    format!("File and Sub-Folder {} Canceled", mode.noun())
}

/// Render the end of a session in the requested format
pub fn format_session(
    mode: MutationMode,
    outcome: &SessionOutcome,
    format: &str,
    color: bool,
) -> Result<String, ApiError> {
    match format {
        "json" => format_session_json(mode, outcome),
        "text" => Ok(format_session_text(mode, outcome, color)),
        other => Err(ApiError::InvalidInput(format!(
            "Unknown output format: {} (must be 'text' or 'json')",
            other
        ))),
    }
}

fn format_session_text(mode: MutationMode, outcome: &SessionOutcome, color: bool) -> String {
    match outcome {
        SessionOutcome::Completed(report) => {
            let mut s = format_report_text(report, color);
            if let Some(err) = &report.aborted {
                let message = format!("An error occurred: {}", err);
                s.push_str(&format!("\n\n{}", paint_error(&message, color)));
            }
            s.push_str(&format!("\n\n{}", completion_message(mode)));
            s
        }
        SessionOutcome::Cancelled => format!("\n{}", cancellation_message(mode)),
        SessionOutcome::Failed(err) => paint_error(
            &format!("An error occurred while executing the action: {}", err),
            color,
        ),
    }
}

fn format_session_json(mode: MutationMode, outcome: &SessionOutcome) -> Result<String, ApiError> {
    let out = match outcome {
        SessionOutcome::Completed(report) => serde_json::json!({
            "status": if report.is_aborted() { "aborted" } else { "completed" },
            "mode": mode,
            "report": report,
        }),
        SessionOutcome::Cancelled => serde_json::json!({
            "status": "cancelled",
            "mode": mode,
        }),
        SessionOutcome::Failed(err) => serde_json::json!({
            "status": "failed",
            "mode": mode,
            "error": err,
        }),
    };
    serde_json::to_string_pretty(&out)
        .map_err(|e| ApiError::InvalidInput(format!("Failed to render report: {}", e)))
}

/// Skipped entries, one diagnostic per line, followed by a summary table
pub fn format_report_text(report: &MutationReport, color: bool) -> String {
    let mut lines: Vec<String> = report
        .skipped
        .iter()
        .map(|entry| {
            let line = format!("{}: {}", entry.reason, entry.path.display());
            if color {
                line.yellow().to_string()
            } else {
                line
            }
        })
        .collect();

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["", "Count"]);
    table.add_row(vec!["Files scanned".to_string(), report.files_scanned.to_string()]);
    table.add_row(vec!["Files matched".to_string(), report.files_matched.to_string()]);
    table.add_row(vec![
        format!("Files {}", report.mode.past_tense().to_lowercase()),
        report.files_mutated.to_string(),
    ]);
    if report.mode.needs_destination() {
        table.add_row(vec![
            "Directories created".to_string(),
            report.directories_created.to_string(),
        ]);
    }
    if report.mode.prunes() {
        table.add_row(vec![
            "Directories removed".to_string(),
            report.directories_pruned.to_string(),
        ]);
    }
    table.add_row(vec!["Skipped".to_string(), report.skipped.len().to_string()]);

    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(table.to_string());
    lines.join("\n")
}

fn paint_error(message: &str, color: bool) -> String {
    if color {
        message.red().bold().to_string()
    } else {
        message.to_string()
    }
}

//! CLI domain: parse, prompt, route, output, and presentation only.
//! Tree mutation itself lives in [`crate::tree`].

mod output;
mod parse;
mod presentation;
mod prompt;
mod route;

pub use output::map_error;
pub use parse::Cli;
pub use presentation::{
    cancellation_message, completion_message, confirmation_preamble, format_report_text,
    format_session, start_message,
};
pub use prompt::{DialoguerPrompter, LinePrompter, Prompter, Validator};
pub use route::{RunContext, SessionOutcome, SessionResult};

/// Shown before the binary waits for Enter on exit
pub const EXIT_PROMPT: &str = "Press Enter to exit the program";

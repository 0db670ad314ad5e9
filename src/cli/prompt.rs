//! Interactive prompts. Each question is re-asked until its validator accepts the answer.

use crate::error::ApiError;
use dialoguer::Input;
use std::io::{BufRead, Write};

/// Checks one answer; the `Err` message is shown before asking again
pub type Validator<'a> = &'a dyn Fn(&str) -> Result<(), String>;

/// Source of answers for a session
pub trait Prompter {
    /// Ask until `validate` accepts; returns the accepted answer, trimmed
    fn ask(&mut self, prompt: &str, validate: Validator<'_>) -> Result<String, ApiError>;

    /// Show a line of text
    fn notify(&mut self, message: &str) -> Result<(), ApiError>;

    /// Wait for the user to press Enter
    fn acknowledge(&mut self, prompt: &str) -> Result<(), ApiError>;
}

/// Terminal prompts through `dialoguer`
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn ask(&mut self, prompt: &str, validate: Validator<'_>) -> Result<String, ApiError> {
        let answer: String = Input::new()
            .with_prompt(prompt)
            .validate_with(|input: &String| validate(input))
            .interact_text()?;
        Ok(answer.trim().to_string())
    }

    fn notify(&mut self, message: &str) -> Result<(), ApiError> {
        println!("{}", message);
        Ok(())
    }

    fn acknowledge(&mut self, prompt: &str) -> Result<(), ApiError> {
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(())
    }
}

/// Line-oriented prompts over any reader and writer (piped stdin, tests)
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self) -> Result<Option<String>, ApiError> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| ApiError::Prompt(e.to_string()))?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn write(&mut self, text: &str, newline: bool) -> Result<(), ApiError> {
        let result = if newline {
            writeln!(self.output, "{}", text)
        } else {
            write!(self.output, "{}", text)
        };
        result
            .and_then(|_| self.output.flush())
            .map_err(|e| ApiError::Prompt(e.to_string()))
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask(&mut self, prompt: &str, validate: Validator<'_>) -> Result<String, ApiError> {
        loop {
            self.write(&format!("{}: ", prompt), false)?;
            let Some(answer) = self.read_line()? else {
                return Err(ApiError::Prompt(format!(
                    "input ended while waiting for: {}",
                    prompt
                )));
            };
            match validate(&answer) {
                Ok(()) => return Ok(answer.trim().to_string()),
                Err(message) => self.write(&message, true)?,
            }
        }
    }

    fn notify(&mut self, message: &str) -> Result<(), ApiError> {
        self.write(message, true)
    }

    fn acknowledge(&mut self, prompt: &str) -> Result<(), ApiError> {
        self.write(prompt, true)?;
        self.read_line()?;
        Ok(())
    }
}

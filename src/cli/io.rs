use std::{fmt, io};

use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::cli::core::CommandError;
use crate::cli::output;
use crate::ledger::ConfirmPrompt;

pub fn print_info(message: impl fmt::Display) {
    output::info(message);
}

pub fn print_warning(message: impl fmt::Display) {
    output::warning(message);
}

pub fn print_error(message: impl fmt::Display) {
    output::error(message);
}

pub fn print_success(message: impl fmt::Display) {
    output::success(message);
}

pub fn print_hint(message: impl fmt::Display) {
    output::hint(message);
}

/// Prompt the user for confirmation with a yes/no question.
pub fn confirm_action(theme: &ColorfulTheme, prompt: &str, default: bool) -> io::Result<bool> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(dialoguer_to_io)
}

/// Prompt for free-form text, pre-filled with `initial`. Empty input is allowed.
pub fn prompt_text(
    theme: &ColorfulTheme,
    prompt: &str,
    initial: &str,
) -> Result<String, CommandError> {
    Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()
        .map_err(CommandError::from)
}

/// Let the user pick one entry; `None` when the selection is aborted with ESC.
pub fn select_from(
    theme: &ColorfulTheme,
    prompt: &str,
    items: &[String],
    default: usize,
) -> Result<Option<usize>, CommandError> {
    Select::with_theme(theme)
        .with_prompt(prompt)
        .items(items)
        .default(default.min(items.len().saturating_sub(1)))
        .interact_opt()
        .map_err(CommandError::from)
}

/// Blocking terminal confirmation backed by dialoguer.
pub struct TerminalConfirm<'a> {
    pub theme: &'a ColorfulTheme,
}

impl ConfirmPrompt for TerminalConfirm<'_> {
    fn confirm(&mut self, message: &str) -> io::Result<bool> {
        confirm_action(self.theme, message, false)
    }
}

/// Fixed answer for non-interactive runs (`--yes`, script mode).
pub struct PresetConfirm(pub bool);

impl ConfirmPrompt for PresetConfirm {
    fn confirm(&mut self, _message: &str) -> io::Result<bool> {
        Ok(self.0)
    }
}

fn dialoguer_to_io(err: dialoguer::Error) -> io::Error {
    io::Error::other(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_confirm_answers_without_prompting() {
        assert!(PresetConfirm(true).confirm("Clear?").unwrap());
        assert!(!PresetConfirm(false).confirm("Clear?").unwrap());
    }

    #[test]
    fn dialoguer_errors_become_io_errors() {
        let inner = io::Error::new(io::ErrorKind::BrokenPipe, "terminal closed");
        let converted = dialoguer_to_io(dialoguer::Error::IO(inner));
        assert_eq!(converted.kind(), io::ErrorKind::Other);
        assert!(converted.to_string().contains("terminal closed"));
    }
}

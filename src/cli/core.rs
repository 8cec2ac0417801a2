//! CLI dispatch, error types, and shell context helpers.

use std::{env, io};

use dialoguer::theme::ColorfulTheme;
use rustyline::error::ReadlineError;
use strsim::levenshtein;

use crate::{
    config::{Config, ConfigManager},
    errors::LedgerError,
    ledger::{format_amount, Ledger, LoadReport},
    storage::{JsonFileStore, KeyValueStore, MemoryStore},
};

use super::commands;
use super::forms::ExpenseForm;
use super::io as cli_io;
use super::output;
use super::registry::CommandRegistry;
use super::ui::table_renderer::expense_table;
pub use crate::cli::shell_context::{CliMode, ShellContext};

/// When set, the shell keeps its records in memory and never touches disk.
pub const EPHEMERAL_ENV: &str = "EXPENSE_CORE_EPHEMERAL";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = load_config_or_default(&config_manager);

        let store: Box<dyn KeyValueStore> = if env::var_os(EPHEMERAL_ENV).is_some() {
            tracing::info!("running with in-memory storage");
            Box::new(MemoryStore::new())
        } else {
            Box::new(JsonFileStore::new_default()?)
        };
        let (ledger, report) = Ledger::load(store, config)?;

        let context = Self::from_parts(mode, ledger, Some(config_manager));
        context.report_load(&report);
        Ok(context)
    }

    /// Assembles a context around an already loaded ledger.
    pub fn from_parts(mode: CliMode, ledger: Ledger, config_manager: Option<ConfigManager>) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        let form = ExpenseForm::new(ledger.config().default_category.clone());
        ShellContext {
            mode,
            registry,
            ledger,
            config_manager,
            theme: ColorfulTheme::default(),
            form,
            last_command: None,
            running: true,
        }
    }

    pub(crate) fn mode(&self) -> CliMode {
        self.mode
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.all_names().collect()
    }

    pub(crate) fn category_names(&self) -> Vec<String> {
        self.ledger.config().categories.clone()
    }

    pub(crate) fn prompt(&self) -> String {
        let config = self.ledger.config();
        format!(
            "expenses [{} | {}]> ",
            self.ledger.len(),
            format_amount(&config.currency_prefix, self.ledger.total())
        )
    }

    fn report_load(&self, report: &LoadReport) {
        for warning in &report.warnings {
            cli_io::print_warning(warning);
        }
        if report.loaded > 0 {
            cli_io::print_info(format!("Loaded {} expense(s).", report.loaded));
        }
    }

    /// Prints the expense table followed by the running total.
    pub(crate) fn show_ledger(&self) {
        let view = self.ledger.render();
        output::section("Expenses");
        if view.is_empty() {
            cli_io::print_info("No expenses recorded yet.");
        }
        cli_io::print_info(expense_table(&view).render());
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            tracing::trace!(command, status = %self.status(), "dispatching");
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let mut suggestions: Vec<_> = self
            .registry
            .all_names()
            .map(|key| (levenshtein(key, &needle), key))
            .collect();
        suggestions.sort();

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(cli_io::confirm_action(&self.theme, "Exit shell?", true)?)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
            }
            CommandError::Ledger(LedgerError::Validation(notice)) => {
                cli_io::print_error(notice);
            }
            other => {
                tracing::warn!(error = %other, "command failed");
                cli_io::print_error(other);
            }
        }
    }
}

/// An unreadable config file is left in place and the defaults are used.
fn load_config_or_default(manager: &ConfigManager) -> Config {
    match manager.load() {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(error = %err, path = %manager.path().display(), "config unreadable");
            cli_io::print_warning(format!(
                "Could not read {} ({}); using default settings.",
                manager.path().display(),
                err
            ));
            Config::default()
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error("Input error: {0}")]
    Readline(#[from] ReadlineError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("{0}")]
    Command(String),
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Ledger(inner) => CliError::Core(inner),
            CommandError::Io(inner) => CliError::Io(inner),
            other => CliError::Command(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::output::{set_preferences, OutputPreferences};
    use crate::cli::shell::handle_line;
    use std::fs;
    use tempfile::TempDir;

    fn script_context() -> ShellContext {
        set_preferences(OutputPreferences {
            plain_mode: true,
            quiet_mode: true,
        });
        let (ledger, _) = Ledger::load(Box::new(MemoryStore::new()), Config::default()).unwrap();
        ShellContext::from_parts(CliMode::Script, ledger, None)
    }

    fn run(context: &mut ShellContext, lines: &[&str]) {
        for line in lines {
            match handle_line(context, line) {
                Ok(LoopControl::Continue) => {}
                Ok(LoopControl::Exit) => break,
                Err(err) => context.report_error(err),
            }
        }
    }

    #[test]
    fn add_and_remove_update_total() {
        let mut context = script_context();
        run(
            &mut context,
            &[
                "add \"College Fee\" 150.50 2024-01-10",
                "add Food 49.99 2024-01-11",
            ],
        );
        assert_eq!(context.ledger.len(), 2);
        assert_eq!(context.ledger.render().total_display, "₹200.49");

        run(&mut context, &["remove 1"]);
        assert_eq!(context.ledger.len(), 1);
        assert_eq!(context.ledger.records()[0].category, "Food");
        assert_eq!(context.ledger.render().total_display, "₹49.99");
    }

    #[test]
    fn multi_word_category_without_quotes() {
        let mut context = script_context();
        run(&mut context, &["add college fee 10 2024-02-01"]);
        assert_eq!(context.ledger.records()[0].category, "College Fee");
    }

    #[test]
    fn invalid_amount_surfaces_validation_error() {
        let mut context = script_context();
        let err = handle_line(&mut context, "add Food abc 2024-01-11").unwrap_err();
        assert!(matches!(
            err,
            CommandError::Ledger(LedgerError::Validation(
                crate::errors::ValidationError::InvalidAmount
            ))
        ));
        assert!(context.ledger.is_empty());
    }

    #[test]
    fn remove_rejects_row_zero_and_out_of_range() {
        let mut context = script_context();
        run(&mut context, &["add Food 5 2024-01-01"]);
        assert!(matches!(
            handle_line(&mut context, "remove 0"),
            Err(CommandError::InvalidArguments(_))
        ));
        assert!(matches!(
            handle_line(&mut context, "remove 2"),
            Err(CommandError::InvalidArguments(_))
        ));
        assert_eq!(context.ledger.len(), 1);
    }

    #[test]
    fn remove_by_short_id() {
        let mut context = script_context();
        run(&mut context, &["add Food 5 2024-01-01", "add Rent 7 2024-01-02"]);
        let short = context.ledger.records()[1].id.simple().to_string()[..8].to_string();
        let line = format!("remove --id {short}");
        run(&mut context, &[line.as_str()]);
        assert_eq!(context.ledger.len(), 1);
        assert_eq!(context.ledger.records()[0].category, "Food");
    }

    #[test]
    fn clear_requires_yes_in_script_mode() {
        let mut context = script_context();
        run(&mut context, &["add Food 5 2024-01-01", "clear"]);
        assert_eq!(context.ledger.len(), 1);
        run(&mut context, &["clear --yes"]);
        assert!(context.ledger.is_empty());
    }

    #[test]
    fn exit_stops_the_loop() {
        let mut context = script_context();
        let control = handle_line(&mut context, "exit").unwrap();
        assert_eq!(control, LoopControl::Exit);
        assert!(!context.running);
    }

    #[test]
    fn unknown_command_is_not_an_error() {
        let mut context = script_context();
        let control = handle_line(&mut context, "lst").unwrap();
        assert_eq!(control, LoopControl::Continue);
    }

    #[test]
    fn config_set_currency_persists_and_rerenders() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let (ledger, _) = Ledger::load(Box::new(MemoryStore::new()), Config::default()).unwrap();
        let mut context = ShellContext::from_parts(CliMode::Script, ledger, Some(manager));
        run(
            &mut context,
            &["add Food 2.5 2024-03-01", "config set currency $"],
        );
        assert_eq!(context.ledger.render().total_display, "$2.50");
        let reloaded = ConfigManager::with_base_dir(temp.path().to_path_buf())
            .unwrap()
            .load()
            .unwrap();
        assert_eq!(reloaded.currency_prefix, "$");
    }

    #[test]
    fn config_rejects_date_format_without_full_date() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config_path = manager.path().to_path_buf();
        let (ledger, _) = Ledger::load(Box::new(MemoryStore::new()), Config::default()).unwrap();
        let mut context = ShellContext::from_parts(CliMode::Script, ledger, Some(manager));

        assert!(matches!(
            handle_line(&mut context, "config set date-format %m/%d"),
            Err(CommandError::Ledger(LedgerError::Config(_)))
        ));
        assert_eq!(context.ledger.config().date_format, "%Y-%m-%d");
        assert!(!config_path.exists());

        run(&mut context, &["add Food 10 2024-01-11"]);
        assert_eq!(context.ledger.len(), 1);
    }

    #[test]
    fn config_accepts_alternate_full_date_format() {
        let mut context = script_context();
        run(
            &mut context,
            &["config set date-format %d/%m/%Y", "add Food 10 11/01/2024"],
        );
        assert_eq!(context.ledger.records()[0].date, "11/01/2024");
    }

    #[test]
    fn malformed_config_file_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        fs::write(manager.path(), "{ not json").unwrap();
        assert!(manager.load().is_err());
        assert_eq!(load_config_or_default(&manager), Config::default());
        assert_eq!(fs::read_to_string(manager.path()).unwrap(), "{ not json");
    }

    #[test]
    fn config_rejects_unknown_default_category() {
        let mut context = script_context();
        assert!(matches!(
            handle_line(&mut context, "config set default-category Travel"),
            Err(CommandError::InvalidArguments(_))
        ));
        assert_eq!(context.ledger.config().default_category, "College Fee");
    }

    #[test]
    fn prompt_shows_count_and_total() {
        let mut context = script_context();
        run(&mut context, &["add Food 49.99 2024-01-11"]);
        assert_eq!(context.prompt(), "expenses [1 | ₹49.99]> ");
    }
}

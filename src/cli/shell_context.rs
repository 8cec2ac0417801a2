use dialoguer::theme::ColorfulTheme;

use crate::{config::ConfigManager, ledger::Ledger};

use super::{forms::ExpenseForm, registry::CommandRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub ledger: Ledger,
    /// `None` keeps configuration changes in memory only.
    pub config_manager: Option<ConfigManager>,
    pub theme: ColorfulTheme,
    pub form: ExpenseForm,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn status(&self) -> String {
        format!(
            "ShellContext {{ running: {}, last_command: {:?}, records: {} }}",
            self.running,
            self.last_command,
            self.ledger.len()
        )
    }
}

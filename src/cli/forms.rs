//! Input state for the "add expense" flow.

use uuid::Uuid;

use crate::errors::LedgerError;
use crate::ledger::Ledger;

/// The three raw inputs the user fills in before adding an expense.
///
/// Values survive a failed submit so the user can correct them; a successful
/// submit clears amount and date and puts the category back to the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseForm {
    pub category: String,
    pub amount: String,
    pub date: String,
}

impl ExpenseForm {
    pub fn new(default_category: impl Into<String>) -> Self {
        Self {
            category: default_category.into(),
            amount: String::new(),
            date: String::new(),
        }
    }

    pub fn submit(&mut self, ledger: &mut Ledger) -> Result<Uuid, LedgerError> {
        let id = ledger.append(&self.category, &self.amount, &self.date)?;
        self.reset(&ledger.config().default_category);
        Ok(id)
    }

    pub fn reset(&mut self, default_category: &str) {
        self.amount.clear();
        self.date.clear();
        self.category = default_category.to_string();
    }
}

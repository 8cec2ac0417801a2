//! Expense records, the ledger that owns them, and the derived table view.

pub mod amount;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod record;
pub mod view;

pub use amount::{format_amount, parse_amount};
pub use ledger::{ClearOutcome, ConfirmPrompt, Ledger, LoadReport, CLEAR_ALL_PROMPT};
pub use record::ExpenseRecord;
pub use view::{LedgerView, ViewRow};

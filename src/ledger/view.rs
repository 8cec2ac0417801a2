use uuid::Uuid;

use super::amount::format_amount;
use super::record::ExpenseRecord;

/// Displayed table derived from the ledger. Holds no state of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerView {
    pub rows: Vec<ViewRow>,
    pub total: f64,
    pub total_display: String,
}

/// A rendered row. `position` is valid for `remove_at` until the next mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewRow {
    pub position: usize,
    pub id: Uuid,
    pub category: String,
    pub amount: String,
    pub date: String,
}

impl LedgerView {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Rebuilds the whole view from the records; the total is summed afresh.
pub fn render(records: &[ExpenseRecord], currency_prefix: &str) -> LedgerView {
    let rows = records
        .iter()
        .enumerate()
        .map(|(position, record)| ViewRow {
            position,
            id: record.id,
            category: record.category.clone(),
            amount: format_amount(currency_prefix, record.amount),
            date: record.date.clone(),
        })
        .collect();
    let total: f64 = records.iter().map(|record| record.amount).sum();
    LedgerView {
        rows,
        total,
        total_display: format_amount(currency_prefix, total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ledger_renders_zero_total() {
        let view = render(&[], "₹");
        assert!(view.is_empty());
        assert_eq!(view.total_display, "₹0.00");
    }

    #[test]
    fn rows_carry_current_positions() {
        let records = vec![
            ExpenseRecord::new("College Fee", 150.5, "2024-01-10"),
            ExpenseRecord::new("Food", 49.99, "2024-01-11"),
        ];
        let view = render(&records, "₹");
        assert_eq!(view.row_count(), 2);
        assert_eq!(view.rows[1].position, 1);
        assert_eq!(view.rows[1].id, records[1].id);
        assert_eq!(view.rows[0].amount, "₹150.50");
        assert_eq!(view.total_display, "₹200.49");
    }
}

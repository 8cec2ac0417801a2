use crate::cli::output::current_preferences;
use crate::ledger::LedgerView;

/// Describes how a column should align its contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableColumn {
    pub header: &'static str,
    pub max_width: Option<usize>,
    pub alignment: Alignment,
}

impl TableColumn {
    pub const fn new(header: &'static str, alignment: Alignment) -> Self {
        Self {
            header,
            max_width: None,
            alignment,
        }
    }

    pub fn capped(mut self, max_width: usize) -> Self {
        self.max_width = Some(max_width);
        self
    }
}

/// Plain-text table with an optional footer line spanning the full width.
#[derive(Clone, Debug)]
pub struct Table {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
    pub footer: Option<(String, String)>,
}

impl Table {
    pub fn compute_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let widest = self
                    .rows
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| display_width(cell))
                    .fold(display_width(column.header), usize::max);
                match column.max_width {
                    Some(max) => widest.min(max),
                    None => widest,
                }
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let widths = self.compute_widths();
        let gaps = COLUMN_GAP.len() * widths.len().saturating_sub(1);
        let total_width = widths.iter().sum::<usize>() + gaps;
        let rule = rule_char().to_string().repeat(total_width);

        let mut lines = Vec::with_capacity(self.rows.len() + 4);
        let headers: Vec<String> = self
            .columns
            .iter()
            .map(|column| column.header.to_string())
            .collect();
        lines.push(self.render_row(&headers, &widths));
        lines.push(rule.clone());
        for row in &self.rows {
            lines.push(self.render_row(row, &widths));
        }
        if let Some((label, value)) = &self.footer {
            lines.push(rule);
            let gap = total_width.saturating_sub(display_width(label) + display_width(value));
            lines.push(format!("{label}{}{value}", " ".repeat(gap.max(1))));
        }
        lines.join("\n")
    }

    fn render_row(&self, row: &[String], widths: &[usize]) -> String {
        let cells: Vec<String> = self
            .columns
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(idx, (column, &width))| {
                let text = row.get(idx).map(String::as_str).unwrap_or("");
                pad_cell(text, width, column.alignment)
            })
            .collect();
        cells.join(COLUMN_GAP).trim_end().to_string()
    }
}

const COLUMN_GAP: &str = "  ";

/// Columns of the expense table: row number, category, amount, date, short id.
pub fn expense_table(view: &LedgerView) -> Table {
    let columns = vec![
        TableColumn::new("#", Alignment::Right),
        TableColumn::new("Category", Alignment::Left).capped(24),
        TableColumn::new("Amount", Alignment::Right),
        TableColumn::new("Date", Alignment::Left),
        TableColumn::new("Id", Alignment::Left),
    ];
    let rows = view
        .rows
        .iter()
        .map(|row| {
            let id = row.id.simple().to_string();
            vec![
                (row.position + 1).to_string(),
                row.category.clone(),
                row.amount.clone(),
                row.date.clone(),
                id[..8].to_string(),
            ]
        })
        .collect();
    Table {
        columns,
        rows,
        footer: Some(("Total".to_string(), view.total_display.clone())),
    }
}

fn rule_char() -> char {
    if current_preferences().plain_mode {
        '-'
    } else {
        '─'
    }
}

fn display_width(text: &str) -> usize {
    text.chars().count()
}

/// Pads or truncates `text` to exactly `width` characters.
pub fn pad_cell(text: &str, width: usize, alignment: Alignment) -> String {
    let fitted = if display_width(text) > width {
        if width == 0 {
            String::new()
        } else {
            let mut cut: String = text.chars().take(width - 1).collect();
            cut.push('…');
            cut
        }
    } else {
        text.to_string()
    };
    let fill = " ".repeat(width.saturating_sub(display_width(&fitted)));
    match alignment {
        Alignment::Left => format!("{fitted}{fill}"),
        Alignment::Right => format!("{fill}{fitted}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::output::{set_preferences, OutputPreferences};
    use crate::ledger::{view, ExpenseRecord};

    fn plain() {
        set_preferences(OutputPreferences {
            plain_mode: true,
            quiet_mode: false,
        });
    }

    #[test]
    fn pad_cell_aligns_and_truncates() {
        assert_eq!(pad_cell("AB", 4, Alignment::Left), "AB  ");
        assert_eq!(pad_cell("AB", 4, Alignment::Right), "  AB");
        assert_eq!(pad_cell("Entertainment", 6, Alignment::Left), "Enter…");
        assert_eq!(pad_cell("₹5.00", 6, Alignment::Right), " ₹5.00");
    }

    #[test]
    fn expense_table_lists_rows_and_total() {
        plain();
        let records = vec![
            ExpenseRecord::new("College Fee", 150.5, "2024-01-10"),
            ExpenseRecord::new("Food", 49.99, "2024-01-11"),
        ];
        let rendered = expense_table(&view::render(&records, "₹")).render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("#  Category"));
        assert!(lines[2].starts_with("1  College Fee  ₹150.50  2024-01-10"));
        assert!(lines[3].starts_with("2  Food          ₹49.99  2024-01-11"));
        assert!(lines[5].starts_with("Total"));
        assert!(lines[5].ends_with("₹200.49"));
    }

    #[test]
    fn empty_view_still_shows_total() {
        plain();
        let rendered = expense_table(&view::render(&[], "₹")).render();
        assert!(rendered.lines().last().unwrap().ends_with("₹0.00"));
        assert_eq!(rendered.lines().count(), 4);
    }
}

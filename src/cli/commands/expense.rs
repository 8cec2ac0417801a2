use uuid::Uuid;

use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::io::{self, PresetConfirm, TerminalConfirm};
use crate::cli::registry::CommandEntry;
use crate::errors::LedgerError;
use crate::ledger::{format_amount, ClearOutcome, ExpenseRecord};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add",
            "Record a new expense",
            "add [<category> <amount> <date>]",
            cmd_add,
        )
        .with_aliases(&["new"]),
        CommandEntry::new(
            "list",
            "Show every expense and the running total",
            "list",
            cmd_list,
        )
        .with_aliases(&["ls", "show"]),
        CommandEntry::new(
            "remove",
            "Delete one expense by row number or id",
            "remove [<row> | --id <id>]",
            cmd_remove,
        )
        .with_aliases(&["rm", "delete"]),
        CommandEntry::new(
            "clear",
            "Delete every expense after confirmation",
            "clear [--yes]",
            cmd_clear,
        ),
        CommandEntry::new(
            "categories",
            "List the categories an expense can use",
            "categories",
            cmd_categories,
        ),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.len() {
        0 if context.mode() == CliMode::Interactive => {
            if !fill_form(context)? {
                io::print_info("Add cancelled.");
                return Ok(());
            }
        }
        0..=2 => {
            return Err(CommandError::InvalidArguments(
                "usage: add <category> <amount> <date>".into(),
            ))
        }
        count => {
            // Category names may contain spaces; amount and date never do.
            let (category, rest) = args.split_at(count - 2);
            context.form.category = category.join(" ");
            context.form.amount = rest[0].to_string();
            context.form.date = rest[1].to_string();
        }
    }

    let id = context.form.submit(&mut context.ledger)?;
    io::print_success(format!("Expense added ({}).", short_id(id)));
    context.show_ledger();
    Ok(())
}

/// Walks the user through the three form fields, keeping earlier input as defaults.
fn fill_form(context: &mut ShellContext) -> Result<bool, CommandError> {
    let categories = context.category_names();
    let default = categories
        .iter()
        .position(|name| name.eq_ignore_ascii_case(&context.form.category))
        .unwrap_or(0);
    let Some(choice) = io::select_from(&context.theme, "Category", &categories, default)? else {
        return Ok(false);
    };
    context.form.category = categories[choice].clone();

    let amount_prompt = format!("Amount ({})", context.ledger.config().currency_prefix);
    context.form.amount = io::prompt_text(&context.theme, &amount_prompt, &context.form.amount)?;

    let date_prompt = format!("Date ({})", context.ledger.config().date_format);
    context.form.date = io::prompt_text(&context.theme, &date_prompt, &context.form.date)?;
    Ok(true)
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.show_ledger();
    Ok(())
}

fn cmd_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let removed = match args {
        ["--id", raw] => {
            let id = resolve_id(context, raw)?;
            context.ledger.remove_by_id(id)?
        }
        [row] => {
            let position = parse_row(row)?;
            remove_row(context, position)?
        }
        [] if context.mode() == CliMode::Interactive => {
            if context.ledger.is_empty() {
                io::print_info("There is nothing to remove.");
                return Ok(());
            }
            let labels = row_labels(context);
            let Some(position) = io::select_from(&context.theme, "Remove which expense?", &labels, 0)?
            else {
                io::print_info("Remove cancelled.");
                return Ok(());
            };
            remove_row(context, position)?
        }
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: remove <row> | remove --id <id>".into(),
            ))
        }
    };

    io::print_success(format!(
        "Removed {} {} on {}.",
        removed.category,
        format_amount(&context.ledger.config().currency_prefix, removed.amount),
        removed.date
    ));
    context.show_ledger();
    Ok(())
}

fn cmd_clear(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let assume_yes = match args {
        [] => false,
        ["--yes"] | ["-y"] => true,
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: clear [--yes]".into(),
            ))
        }
    };

    let outcome = if assume_yes {
        context.ledger.clear_all(&mut PresetConfirm(true))?
    } else if context.mode() == CliMode::Interactive {
        let mut prompt = TerminalConfirm {
            theme: &context.theme,
        };
        context.ledger.clear_all(&mut prompt)?
    } else {
        io::print_warning("Clearing needs confirmation; use `clear --yes` in scripts.");
        context.ledger.clear_all(&mut PresetConfirm(false))?
    };

    match outcome {
        ClearOutcome::Cleared(count) => {
            io::print_success(format!("Cleared {} expense(s).", count));
            context.show_ledger();
        }
        ClearOutcome::Declined => io::print_info("Nothing was removed."),
    }
    Ok(())
}

fn cmd_categories(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let config = context.ledger.config();
    for name in &config.categories {
        if *name == config.default_category {
            io::print_info(format!("  {} (default)", name));
        } else {
            io::print_info(format!("  {}", name));
        }
    }
    Ok(())
}

/// Rows are shown 1-based; positions in the ledger are 0-based.
fn parse_row(raw: &str) -> Result<usize, CommandError> {
    match raw.parse::<usize>() {
        Ok(row) if row >= 1 => Ok(row - 1),
        _ => Err(CommandError::InvalidArguments(format!(
            "`{}` is not a row number; rows start at 1",
            raw
        ))),
    }
}

fn remove_row(context: &mut ShellContext, position: usize) -> Result<ExpenseRecord, CommandError> {
    match context.ledger.remove_at(position) {
        Ok(record) => Ok(record),
        Err(LedgerError::PositionOutOfRange { len, .. }) => {
            Err(CommandError::InvalidArguments(format!(
                "No expense at row {}; the table has {} row(s)",
                position + 1,
                len
            )))
        }
        Err(err) => Err(err.into()),
    }
}

/// Accepts a full UUID or an unambiguous prefix of its simple form.
fn resolve_id(context: &ShellContext, raw: &str) -> Result<Uuid, CommandError> {
    if let Ok(id) = Uuid::parse_str(raw) {
        return Ok(id);
    }
    let needle = raw.replace('-', "").to_lowercase();
    if needle.is_empty() {
        return Err(CommandError::InvalidArguments("an id is required".into()));
    }
    let mut matches = context
        .ledger
        .records()
        .iter()
        .filter(|record| record.id.simple().to_string().starts_with(&needle));
    match (matches.next(), matches.next()) {
        (Some(record), None) => Ok(record.id),
        (None, _) => Err(CommandError::InvalidArguments(format!(
            "No expense with id `{}`",
            raw
        ))),
        (Some(_), Some(_)) => Err(CommandError::InvalidArguments(format!(
            "id `{}` matches more than one expense",
            raw
        ))),
    }
}

fn row_labels(context: &ShellContext) -> Vec<String> {
    context
        .ledger
        .render()
        .rows
        .into_iter()
        .map(|row| {
            format!(
                "{}. {} {} {}",
                row.position + 1,
                row.category,
                row.amount,
                row.date
            )
        })
        .collect()
}

fn short_id(id: Uuid) -> String {
    let mut short = id.simple().to_string();
    short.truncate(8);
    short
}

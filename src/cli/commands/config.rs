use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;

const KEYS: &str = "currency|default-category|date-format";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change preferences",
        "config [show | set <currency|default-category|date-format> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => {
            show_config(context);
            Ok(())
        }
        ["set", key, value @ ..] if !value.is_empty() => {
            set_config_value(context, key, value.join(" ").trim())
        }
        _ => Err(CommandError::InvalidArguments(format!(
            "usage: config set <{}> <value>",
            KEYS
        ))),
    }
}

fn show_config(context: &ShellContext) {
    let config = context.ledger.config();
    output_section("Configuration");
    io::print_info(format!("  Currency prefix : {}", config.currency_prefix));
    io::print_info(format!("  Default category: {}", config.default_category));
    io::print_info(format!("  Date format     : {}", config.date_format));
    io::print_info(format!("  Storage key     : {}", config.storage_key));
    io::print_info(format!("  Categories      : {}", config.categories.join(", ")));
    match &context.config_manager {
        Some(manager) => io::print_info(format!("  Config file     : {}", manager.path().display())),
        None => io::print_info("  Config file     : (not saved)"),
    }
}

fn set_config_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let mut config = context.ledger.config().clone();
    match key.to_lowercase().as_str() {
        "currency" => config.currency_prefix = value.to_string(),
        "default-category" => {
            let Some(name) = config.resolve_category(value).map(str::to_string) else {
                return Err(CommandError::InvalidArguments(format!(
                    "unknown category `{}`",
                    value
                )));
            };
            config.default_category = name;
        }
        "date-format" => config.date_format = value.to_string(),
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown config key `{}` (expected {})",
                other, KEYS
            )))
        }
    }

    config.validate()?;
    if let Some(manager) = &context.config_manager {
        manager.save(&config)?;
    }
    context.ledger.set_config(config)?;
    context.form.reset(&context.ledger.config().default_category);
    io::print_success("Configuration updated.");
    context.show_ledger();
    Ok(())
}

use std::collections::HashMap;

use crate::cli::core::CommandResult;
use crate::cli::shell_context::ShellContext;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

pub struct CommandEntry {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            aliases: &[],
            description,
            usage,
            handler,
        }
    }

    pub fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }
}

/// Commands in registration order, addressable by name or alias.
#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<CommandEntry>,
    lookup: HashMap<&'static str, usize>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later registrations of an existing name or alias replace the earlier binding.
    pub fn register(&mut self, entry: CommandEntry) {
        let index = self.commands.len();
        self.lookup.insert(entry.name, index);
        for alias in entry.aliases {
            self.lookup.insert(alias, index);
        }
        self.commands.push(entry);
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.lookup.get(name).map(|&index| &self.commands[index])
    }

    pub fn list(&self) -> impl Iterator<Item = &CommandEntry> {
        self.commands.iter()
    }

    /// Names and aliases; used for completion and suggestions.
    pub fn all_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.lookup.keys().copied()
    }

    pub fn handler(&self, name: &str) -> Option<CommandHandler> {
        self.get(name).map(|entry| entry.handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &mut ShellContext, _: &[&str]) -> CommandResult {
        Ok(())
    }

    #[test]
    fn aliases_resolve_to_primary_entry() {
        let mut registry = CommandRegistry::new();
        registry.register(
            CommandEntry::new("remove", "Remove", "remove <row>", noop).with_aliases(&["rm"]),
        );
        registry.register(CommandEntry::new("list", "List", "list", noop));
        assert_eq!(registry.get("rm").map(|entry| entry.name), Some("remove"));
        let names: Vec<_> = registry.list().map(|entry| entry.name).collect();
        assert_eq!(names, vec!["remove", "list"]);
        assert_eq!(registry.all_names().count(), 3);
        assert!(registry.handler("missing").is_none());
    }
}

//! Meta-commands (tokens starting with a backslash).
//!
//! Commands act on the stack as a whole rather than on values. A renderer
//! may intercept any `\`-token before this table is consulted, which is how
//! presentation-only commands such as `\help` are implemented.

/// A built-in meta-command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    Clear,
    Pop,
    Dup,
    Swap,
    Undo,
    Redo,
}

impl Command {
    /// Undo and redo replace the whole stack version, so they must be the
    /// only token of their submission.
    pub fn is_history(self) -> bool {
        matches!(self, Command::Undo | Command::Redo)
    }
}

/// Metadata for one command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommandInfo {
    pub command: Command,
    /// Name without the leading backslash.
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
}

impl CommandInfo {
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.name).chain(self.aliases.iter().copied())
    }
}

const COMMANDS: &[CommandInfo] = &[
    CommandInfo {
        command: Command::Clear,
        name: "clear",
        aliases: &[],
        description: "Remove every item from the stack",
    },
    CommandInfo {
        command: Command::Pop,
        name: "pop",
        aliases: &["drop"],
        description: "Remove the top item",
    },
    CommandInfo {
        command: Command::Dup,
        name: "dup",
        aliases: &[],
        description: "Duplicate the top item",
    },
    CommandInfo {
        command: Command::Swap,
        name: "swap",
        aliases: &[],
        description: "Exchange the top two items",
    },
    CommandInfo {
        command: Command::Undo,
        name: "undo",
        aliases: &[],
        description: "Restore the stack as it was before the last change",
    },
    CommandInfo {
        command: Command::Redo,
        name: "redo",
        aliases: &[],
        description: "Reapply the last undone change",
    },
];

/// Lookup table for meta-commands.
pub struct CommandTable;

impl CommandTable {
    /// All commands, in help order.
    pub fn commands() -> &'static [CommandInfo] {
        COMMANDS
    }

    /// Look up a token such as `\drop`. Case-sensitive.
    pub fn find(token: &str) -> Option<&'static CommandInfo> {
        let name = token.strip_prefix('\\')?;
        COMMANDS.iter().find(|info| info.names().any(|n| n == name))
    }

    /// Backslash-prefixed names and aliases starting with `partial`, which
    /// itself starts with `\`. Sorted by length, then lexicographically.
    pub fn complete(partial: &str) -> Vec<String> {
        let Some(prefix) = partial.strip_prefix('\\') else {
            return Vec::new();
        };
        let mut names: Vec<&str> = COMMANDS
            .iter()
            .flat_map(|info| info.names())
            .filter(|name| name.starts_with(prefix))
            .collect();
        names.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        names.into_iter().map(|name| format!("\\{name}")).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_by_name_and_alias() {
        assert_eq!(CommandTable::find("\\clear").map(|c| c.command), Some(Command::Clear));
        assert_eq!(CommandTable::find("\\drop").map(|c| c.command), Some(Command::Pop));
        assert!(CommandTable::find("clear").is_none());
        assert!(CommandTable::find("\\Clear").is_none());
        assert!(CommandTable::find("\\help").is_none());
    }

    #[test]
    fn history_commands() {
        assert!(Command::Undo.is_history());
        assert!(Command::Redo.is_history());
        assert!(!Command::Dup.is_history());
    }

    #[test]
    fn completion() {
        assert_eq!(CommandTable::complete("\\d"), vec!["\\dup", "\\drop"]);
        assert_eq!(CommandTable::complete("\\"), {
            let mut all = vec!["\\dup", "\\pop", "\\drop", "\\redo", "\\swap", "\\undo", "\\clear"];
            all.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
            all
        });
        assert!(CommandTable::complete("d").is_empty());
    }
}

//! # Command Definitions
//!
//! The command reference shown by the help screen.

/// A documented command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandHelp {
    /// What to type
    pub keys: &'static str,
    /// What it does
    pub description: &'static str,
}

/// Every command the text front end accepts.
pub const COMMANDS: &[CommandHelp] = &[
    CommandHelp {
        keys: "w a s d / up down left right / k j h l",
        description: "move one cell",
    },
    CommandHelp {
        keys: "n",
        description: "next level (after a win)",
    },
    CommandHelp {
        keys: "r",
        description: "retry the level on a new board",
    },
    CommandHelp {
        keys: "new",
        description: "start a new run from level 1",
    },
    CommandHelp {
        keys: "auto",
        description: "toggle the automated player",
    },
    CommandHelp {
        keys: "name <player>",
        description: "set your leaderboard name",
    },
    CommandHelp {
        keys: "?",
        description: "show this help",
    },
    CommandHelp {
        keys: "q",
        description: "quit",
    },
];

/// Renders the command reference, one command per line.
pub fn help_text() -> String {
    let width = COMMANDS.iter().map(|c| c.keys.len()).max().unwrap_or(0);
    COMMANDS
        .iter()
        .map(|c| format!("  {:<width$}  {}", c.keys, c.description, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

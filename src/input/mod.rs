//! # Input Module
//!
//! Turns typed commands into player inputs.

pub mod commands;

pub use commands::*;

use crate::Direction;

/// Input handler for processing player commands.
///
/// Each line of input is one command. Movement accepts WASD, arrow words,
/// and optionally Vi-style keys.
pub struct InputHandler {
    /// Whether to enable Vi-style movement keys (hjkl)
    pub vi_keys_enabled: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new input handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use heatseeker::{Direction, InputHandler, PlayerInput};
    ///
    /// let input_handler = InputHandler::new();
    /// assert_eq!(input_handler.parse_line("w"), Some(PlayerInput::Move(Direction::Up)));
    /// assert_eq!(input_handler.parse_line("bogus"), None);
    /// ```
    pub fn new() -> Self {
        Self {
            vi_keys_enabled: true,
        }
    }

    /// Parses one line of input. Returns None for blank or unrecognized lines.
    pub fn parse_line(&self, line: &str) -> Option<PlayerInput> {
        let line = line.trim();
        // The keyword is case-insensitive; the name keeps its case
        let (keyword, rest) = line.split_at(line.find(char::is_whitespace).unwrap_or(line.len()));
        if keyword.eq_ignore_ascii_case("name") && !rest.is_empty() {
            return Some(PlayerInput::SetName(rest.trim().to_string()));
        }

        let command = line.to_ascii_lowercase();
        if let Some(direction) = Direction::from_name(&command) {
            return Some(PlayerInput::Move(direction));
        }

        match command.as_str() {
            "w" => Some(PlayerInput::Move(Direction::Up)),
            "s" => Some(PlayerInput::Move(Direction::Down)),
            "a" => Some(PlayerInput::Move(Direction::Left)),
            "d" => Some(PlayerInput::Move(Direction::Right)),
            "k" if self.vi_keys_enabled => Some(PlayerInput::Move(Direction::Up)),
            "j" if self.vi_keys_enabled => Some(PlayerInput::Move(Direction::Down)),
            "h" if self.vi_keys_enabled => Some(PlayerInput::Move(Direction::Left)),
            "l" if self.vi_keys_enabled => Some(PlayerInput::Move(Direction::Right)),
            "n" | "next" => Some(PlayerInput::NextLevel),
            "r" | "retry" => Some(PlayerInput::RetryLevel),
            "new" => Some(PlayerInput::NewRun),
            "auto" => Some(PlayerInput::ToggleAutoplay),
            "?" | "help" => Some(PlayerInput::Help),
            "q" | "quit" | "exit" => Some(PlayerInput::Quit),
            _ => None,
        }
    }
}

/// Player input types that can be processed by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerInput {
    /// Step one cell
    Move(Direction),
    /// Continue to the next level after a win
    NextLevel,
    /// Replay the current level on a new board
    RetryLevel,
    /// Abandon the run and start again from level 1
    NewRun,
    /// Let the automated player take over, or hand control back
    ToggleAutoplay,
    /// Set the name shown on the leaderboard
    SetName(String),
    /// Show help information
    Help,
    /// Quit the game
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_keys() {
        let input = InputHandler::new();
        assert_eq!(input.parse_line("W"), Some(PlayerInput::Move(Direction::Up)));
        assert_eq!(input.parse_line("down"), Some(PlayerInput::Move(Direction::Down)));
        assert_eq!(input.parse_line(" h "), Some(PlayerInput::Move(Direction::Left)));
        assert_eq!(input.parse_line("d"), Some(PlayerInput::Move(Direction::Right)));
    }

    #[test]
    fn test_vi_keys_can_be_disabled() {
        let input = InputHandler {
            vi_keys_enabled: false,
        };
        assert_eq!(input.parse_line("k"), None);
        assert_eq!(input.parse_line("w"), Some(PlayerInput::Move(Direction::Up)));
    }

    #[test]
    fn test_commands() {
        let input = InputHandler::new();
        assert_eq!(input.parse_line("n"), Some(PlayerInput::NextLevel));
        assert_eq!(input.parse_line("retry"), Some(PlayerInput::RetryLevel));
        assert_eq!(input.parse_line("new"), Some(PlayerInput::NewRun));
        assert_eq!(input.parse_line("auto"), Some(PlayerInput::ToggleAutoplay));
        assert_eq!(input.parse_line("?"), Some(PlayerInput::Help));
        assert_eq!(input.parse_line("q"), Some(PlayerInput::Quit));
        assert_eq!(input.parse_line(""), None);
    }

    #[test]
    fn test_name_keeps_case() {
        let input = InputHandler::new();
        assert_eq!(
            input.parse_line("name Ada Lovelace"),
            Some(PlayerInput::SetName("Ada Lovelace".to_string()))
        );
        assert_eq!(
            input.parse_line("Name Ada"),
            Some(PlayerInput::SetName("Ada".to_string()))
        );
        assert_eq!(
            input.parse_line("NAME\tGrace Hopper"),
            Some(PlayerInput::SetName("Grace Hopper".to_string()))
        );
        assert_eq!(input.parse_line("name"), None);
    }
}

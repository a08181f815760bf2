//! # Text Display
//!
//! Renders the board, a status panel, and recent messages as plain text.

use crate::config::MESSAGE_LOG_CAPACITY;
use crate::{CellReading, GameState, GameStatus, LeaderboardEntry, Position};

/// Text renderer with a scrolling viewport and a message log.
///
/// Large boards are shown through a viewport centred on the player.
#[derive(Debug, Clone)]
pub struct TextDisplay {
    /// Columns of the board shown at once
    pub map_width: i32,
    /// Rows of the board shown at once
    pub map_height: i32,
    viewport_x: i32,
    viewport_y: i32,
    /// Recent messages, oldest first
    pub messages: Vec<String>,
    /// Maximum number of messages to keep
    pub max_messages: usize,
}

impl Default for TextDisplay {
    fn default() -> Self {
        Self::new(40, 20)
    }
}

impl TextDisplay {
    /// Creates a display showing at most `map_width` by `map_height` cells.
    pub fn new(map_width: i32, map_height: i32) -> Self {
        Self {
            map_width: map_width.max(1),
            map_height: map_height.max(1),
            viewport_x: 0,
            viewport_y: 0,
            messages: Vec::new(),
            max_messages: MESSAGE_LOG_CAPACITY,
        }
    }

    /// Centers the viewport on the given position, keeping it on the board.
    pub fn center_viewport_on_position(&mut self, position: Position, grid_size: u32) {
        let size = grid_size as i32;
        let max_x = (size - self.map_width).max(0);
        let max_y = (size - self.map_height).max(0);
        self.viewport_x = (position.x - self.map_width / 2).clamp(0, max_x);
        self.viewport_y = (position.y - self.map_height / 2).clamp(0, max_y);
    }

    /// Renders the visible part of the board, the status panel, and messages.
    pub fn render_game<R>(&mut self, game_state: &GameState<R>) -> String {
        self.center_viewport_on_position(game_state.position(), game_state.grid_size());

        let mut out = String::new();
        out.push_str(&self.render_map(game_state));
        out.push_str(&self.render_status(game_state));
        for message in self.recent_messages(3) {
            out.push_str("> ");
            out.push_str(message);
            out.push('\n');
        }
        out
    }

    fn render_map<R>(&self, game_state: &GameState<R>) -> String {
        let size = game_state.grid_size() as i32;
        let width = self.map_width.min(size);
        let height = self.map_height.min(size);

        let mut out = String::with_capacity(((width + 1) * height) as usize);
        for screen_y in 0..height {
            for screen_x in 0..width {
                let world_pos = Position::new(self.viewport_x + screen_x, self.viewport_y + screen_y);
                out.push(Self::glyph(game_state, world_pos));
            }
            out.push('\n');
        }
        out
    }

    /// The character shown for a single cell.
    pub fn glyph<R>(game_state: &GameState<R>, position: Position) -> char {
        if position == game_state.position() && game_state.status() != GameStatus::Lost {
            return '@';
        }
        match game_state.reading_at(position) {
            Some(CellReading::Lava) => 'X',
            Some(CellReading::Heat(heat)) => char::from_digit(heat as u32, 10).unwrap_or('?'),
            None => {
                if game_state
                    .revealed_hazards()
                    .is_some_and(|hazards| hazards.contains(position))
                {
                    '*'
                } else if position == game_state.level().target() {
                    'G'
                } else {
                    '.'
                }
            }
        }
    }

    fn render_status<R>(&self, game_state: &GameState<R>) -> String {
        let level = game_state.level();
        let status = match game_state.status() {
            GameStatus::Playing => "playing",
            GameStatus::Won if game_state.is_run_complete() => "run complete",
            GameStatus::Won => "level complete",
            GameStatus::Lost => "burned",
        };
        format!(
            "Level {}/{}  {}x{}  lava {}-{}\nMoves {} (run {})  heat here {}  [{}]\n",
            game_state.level_index() + 1,
            game_state.catalog_len(),
            level.size,
            level.size,
            level.min_hazards,
            level.max_hazards,
            game_state.level_moves(),
            game_state.total_moves(),
            game_state
                .reading_at(game_state.position())
                .map(|reading| reading.value().to_string())
                .unwrap_or_else(|| "-".to_string()),
            status
        )
    }

    /// Formats leaderboard rows for display.
    pub fn render_leaderboard(entries: &[LeaderboardEntry]) -> String {
        if entries.is_empty() {
            return "Leaderboard is empty\n".to_string();
        }
        let mut out = String::from("Rank  Name                      Level  Moves\n");
        for (rank, entry) in entries.iter().enumerate() {
            let marker = if entry.is_human { "" } else { " (bot)" };
            out.push_str(&format!(
                "{:>4}  {:<24}  {:>5}  {:>5}{}\n",
                rank + 1,
                entry.player_name,
                entry.level_reached,
                entry.total_moves,
                marker
            ));
        }
        out
    }

    /// Adds a message to the message log.
    pub fn add_message(&mut self, message: String) {
        self.messages.push(message);

        // Keep only the most recent messages
        if self.messages.len() > self.max_messages {
            self.messages.remove(0);
        }
    }

    /// The last `count` messages, oldest first.
    pub fn recent_messages(&self, count: usize) -> &[String] {
        let start = self.messages.len().saturating_sub(count);
        &self.messages[start..]
    }
}

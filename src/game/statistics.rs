//! # Run Statistics
//!
//! Move counters and the progress figures reported to the leaderboard.

use crate::GameEvent;
use serde::{Deserialize, Serialize};

/// Counters maintained across one run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RunStatistics {
    /// Moves made in the current level attempt
    pub level_moves: u32,
    /// Moves made since the run started, across every attempt
    pub total_moves: u64,
    /// Number of levels counted as reached (1-based); 0 until the first win
    pub highest_level_reached: usize,
    /// Levels won during this run
    pub levels_completed: u32,
    /// Times the player stepped on lava
    pub deaths: u32,
}

impl RunStatistics {
    /// Creates new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates statistics based on a game event.
    ///
    /// # Examples
    ///
    /// ```
    /// use heatseeker::{GameEvent, Position, RunStatistics};
    ///
    /// let mut stats = RunStatistics::new();
    /// stats.update_from_event(&GameEvent::PlayerMoved {
    ///     from: Position::new(0, 9),
    ///     to: Position::new(0, 8),
    /// });
    /// assert_eq!(stats.level_moves, 1);
    /// assert_eq!(stats.total_moves, 1);
    /// ```
    pub fn update_from_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::LevelStarted { .. } => {
                self.level_moves = 0;
            }
            GameEvent::PlayerMoved { .. } => {
                self.level_moves += 1;
                self.total_moves += 1;
            }
            GameEvent::LevelCompleted { level, .. } => {
                self.levels_completed += 1;
                self.highest_level_reached = self.highest_level_reached.max(level + 1);
            }
            GameEvent::SteppedOnLava {
                level, final_level, ..
            } => {
                self.deaths += 1;
                // Dying on the final level still counts as having reached it
                if *final_level {
                    self.highest_level_reached = self.highest_level_reached.max(level + 1);
                }
            }
            GameEvent::RunReset => {
                *self = Self::new();
            }
            GameEvent::HeatRevealed { .. } | GameEvent::RunCompleted { .. } => {}
        }
    }

    /// Progress figures for the leaderboard.
    pub fn progress(&self) -> RunProgress {
        RunProgress {
            level_reached: self.highest_level_reached,
            total_moves: self.total_moves,
        }
    }
}

/// The figures a run reports to the leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunProgress {
    /// Highest level reached, 1-based
    pub level_reached: usize,
    /// Moves made across the whole run
    pub total_moves: u64,
}

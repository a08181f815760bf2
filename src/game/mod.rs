//! # Game Module
//!
//! Core puzzle logic: coordinates, heat, movement, and the run state machine.
//!
//! This module contains the fundamental building blocks of Heatseeker:
//! - Grid positions and movement directions
//! - The heat calculator over a lava field
//! - The clamped move validator
//! - The game state machine and its run statistics
//! - An automated player that only uses what a human can see

pub mod autoplay;
pub mod heat;
pub mod movement;
pub mod state;
pub mod statistics;

pub use autoplay::*;
pub use heat::*;
pub use movement::*;
pub use state::*;
pub use statistics::*;

use serde::{Deserialize, Serialize};

/// Represents a cell coordinate on the board.
///
/// `x` grows to the right and `y` grows downward, both starting at zero.
///
/// # Examples
///
/// ```
/// use heatseeker::Position;
///
/// let pos = Position::new(3, 4);
/// assert_eq!(pos.x, 3);
/// assert_eq!(pos.y, 4);
///
/// let adjacent = pos.adjacent_positions();
/// assert_eq!(adjacent.len(), 8); // All 8 surrounding positions
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Calculates the Manhattan distance to another position.
    ///
    /// # Examples
    ///
    /// ```
    /// use heatseeker::Position;
    ///
    /// let pos1 = Position::new(0, 9);
    /// let pos2 = Position::new(9, 0);
    /// assert_eq!(pos1.manhattan_distance(pos2), 18);
    /// ```
    pub fn manhattan_distance(self, other: Position) -> u32 {
        ((self.x - other.x).abs() + (self.y - other.y).abs()) as u32
    }

    /// Checks whether the position lies on a board of the given side length.
    pub fn in_bounds(self, grid_size: u32) -> bool {
        let size = grid_size as i64;
        (0..size).contains(&(self.x as i64)) && (0..size).contains(&(self.y as i64))
    }

    /// Returns all 8 adjacent positions (including diagonals).
    ///
    /// Positions off the board are included; callers filter with [`Position::in_bounds`]
    /// when it matters.
    pub fn adjacent_positions(self) -> [Position; 8] {
        [
            Position::new(self.x - 1, self.y - 1), // NW
            Position::new(self.x, self.y - 1),     // N
            Position::new(self.x + 1, self.y - 1), // NE
            Position::new(self.x - 1, self.y),     // W
            Position::new(self.x + 1, self.y),     // E
            Position::new(self.x - 1, self.y + 1), // SW
            Position::new(self.x, self.y + 1),     // S
            Position::new(self.x + 1, self.y + 1), // SE
        ]
    }

    /// Returns only the 4 cardinal adjacent positions (no diagonals).
    pub fn cardinal_adjacent_positions(self) -> [Position; 4] {
        [
            Position::new(self.x, self.y - 1), // N
            Position::new(self.x - 1, self.y), // W
            Position::new(self.x + 1, self.y), // E
            Position::new(self.x, self.y + 1), // S
        ]
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four directions a player can step in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Converts a direction to a position delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use heatseeker::{Direction, Position};
    ///
    /// let delta = Direction::Up.to_delta();
    /// assert_eq!(delta, Position::new(0, -1));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::Up => Position::new(0, -1),
            Direction::Down => Position::new(0, 1),
            Direction::Left => Position::new(-1, 0),
            Direction::Right => Position::new(1, 0),
        }
    }

    /// Converts a position delta to a direction.
    ///
    /// Returns None if the delta is not a single orthogonal step.
    pub fn from_delta(delta: Position) -> Option<Direction> {
        match (delta.x, delta.y) {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }

    /// Parses a direction name such as `"up"`. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Direction> {
        match name.trim().to_ascii_lowercase().as_str() {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Lowercase name of the direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Returns all 4 directions.
    pub fn all() -> [Direction; 4] {
        [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

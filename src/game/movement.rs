//! # Movement
//!
//! Clamped single-step movement on a square board.

use crate::{Direction, Position};

/// Result of asking to step in a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Whether the position actually changed
    pub moved: bool,
    /// Where the player ends up, which is the start position when `moved` is false
    pub destination: Position,
}

impl MoveOutcome {
    fn stay(position: Position) -> Self {
        Self {
            moved: false,
            destination: position,
        }
    }
}

/// Steps one cell in `direction`, clamped to the board edges.
///
/// A step that would leave the board is absorbed and reported as not moved.
///
/// # Examples
///
/// ```
/// use heatseeker::{try_move, Direction, Position};
///
/// let blocked = try_move(Position::new(0, 0), Direction::Up, 10);
/// assert!(!blocked.moved);
/// assert_eq!(blocked.destination, Position::new(0, 0));
///
/// let stepped = try_move(Position::new(0, 0), Direction::Right, 10);
/// assert!(stepped.moved);
/// assert_eq!(stepped.destination, Position::new(1, 0));
/// ```
pub fn try_move(position: Position, direction: Direction, grid_size: u32) -> MoveOutcome {
    let max = grid_size.saturating_sub(1) as i32;
    let target = position + direction.to_delta();
    let destination = Position::new(target.x.clamp(0, max), target.y.clamp(0, max));

    MoveOutcome {
        moved: destination != position,
        destination,
    }
}

/// Like [`try_move`], but takes a direction name. Unknown names never move.
pub fn try_move_named(position: Position, direction: &str, grid_size: u32) -> MoveOutcome {
    match Direction::from_name(direction) {
        Some(direction) => try_move(position, direction, grid_size),
        None => MoveOutcome::stay(position),
    }
}

//! # Heat
//!
//! Lava fields, per-cell readings, and the neighbour-counting heat calculation.

use crate::config::LOSS_SENTINEL;
use crate::Position;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// The set of lava cells for one level attempt.
///
/// Membership is keyed directly by [`Position`], so neighbour lookups never
/// allocate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HazardSet {
    cells: HashSet<Position>,
}

impl HazardSet {
    /// Creates an empty lava field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty lava field with room for `capacity` cells.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: HashSet::with_capacity(capacity),
        }
    }

    /// Adds a cell. Returns false if it was already lava.
    pub fn insert(&mut self, position: Position) -> bool {
        self.cells.insert(position)
    }

    pub fn contains(&self, position: Position) -> bool {
        self.cells.contains(&position)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.cells.iter()
    }
}

impl FromIterator<Position> for HazardSet {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

/// What a visited cell revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellReading {
    /// A safe cell and its neighbouring lava count (0..=8)
    Heat(u8),
    /// The lava cell that ended the attempt
    Lava,
}

impl CellReading {
    /// Integer form of the reading: the heat, or `-1` for lava.
    ///
    /// # Examples
    ///
    /// ```
    /// use heatseeker::CellReading;
    ///
    /// assert_eq!(CellReading::Heat(3).value(), 3);
    /// assert_eq!(CellReading::Lava.value(), -1);
    /// ```
    pub fn value(self) -> i8 {
        match self {
            CellReading::Heat(heat) => heat as i8,
            CellReading::Lava => LOSS_SENTINEL,
        }
    }

    pub fn heat(self) -> Option<u8> {
        match self {
            CellReading::Heat(heat) => Some(heat),
            CellReading::Lava => None,
        }
    }

    pub fn is_lava(self) -> bool {
        matches!(self, CellReading::Lava)
    }
}

/// Readings of every cell visited during the current attempt.
pub type VisitedMap = HashMap<Position, CellReading>;

/// Counts the lava cells among the eight neighbours of `position`.
///
/// Neighbours off the board can never be lava, so the grid size is not needed.
///
/// # Examples
///
/// ```
/// use heatseeker::{heat, HazardSet, Position};
///
/// let lava: HazardSet = [Position::new(1, 1), Position::new(2, 2)].into_iter().collect();
/// assert_eq!(heat(Position::new(1, 2), &lava), 2);
/// assert_eq!(heat(Position::new(0, 0), &lava), 1);
/// assert_eq!(heat(Position::new(5, 5), &lava), 0);
/// ```
pub fn heat(position: Position, hazards: &HazardSet) -> u8 {
    position
        .adjacent_positions()
        .iter()
        .filter(|neighbor| hazards.contains(**neighbor))
        .count() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lava(cells: &[(i32, i32)]) -> HazardSet {
        cells.iter().map(|&(x, y)| Position::new(x, y)).collect()
    }

    #[test]
    fn test_heat_empty_field() {
        assert_eq!(heat(Position::new(4, 4), &HazardSet::new()), 0);
    }

    #[test]
    fn test_heat_fully_surrounded() {
        let hazards: HazardSet = Position::new(5, 5).adjacent_positions().into_iter().collect();
        assert_eq!(heat(Position::new(5, 5), &hazards), 8);
    }

    #[test]
    fn test_heat_ignores_own_cell() {
        let hazards = lava(&[(3, 3)]);
        assert_eq!(heat(Position::new(3, 3), &hazards), 0);
    }

    #[test]
    fn test_heat_ignores_distance_two() {
        let hazards = lava(&[(5, 7), (7, 5), (3, 3)]);
        assert_eq!(heat(Position::new(5, 5), &hazards), 0);
    }

    #[test]
    fn test_heat_corner_cell() {
        let hazards = lava(&[(1, 0), (0, 1), (1, 1)]);
        assert_eq!(heat(Position::new(0, 0), &hazards), 3);
    }

    #[test]
    fn test_hazard_set_deduplicates() {
        let mut hazards = HazardSet::with_capacity(2);
        assert!(hazards.insert(Position::new(1, 1)));
        assert!(!hazards.insert(Position::new(1, 1)));
        assert_eq!(hazards.len(), 1);
        assert!(!hazards.is_empty());
    }

    #[test]
    fn test_cell_reading_accessors() {
        assert_eq!(CellReading::Heat(0).heat(), Some(0));
        assert_eq!(CellReading::Lava.heat(), None);
        assert!(CellReading::Lava.is_lava());
        assert!(!CellReading::Heat(8).is_lava());
    }
}

//! # Generation Module
//!
//! The level catalog and procedural lava placement.
//!
//! Levels are described by [`LevelDefinition`] records held in an ordered
//! [`LevelCatalog`]. Generators turn a definition and a random source into a
//! fresh level instance; every call is independent and owns no state.

pub mod catalog;
pub mod hazards;

pub use catalog::*;
pub use hazards::*;

use crate::{HeatseekerError, HeatseekerResult, Position};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Largest board side a level may declare.
pub const MAX_LEVEL_SIZE: u32 = 1000;

/// Parameters of a single level.
///
/// # Examples
///
/// ```
/// use heatseeker::{LevelDefinition, Position};
///
/// let level = LevelDefinition::new(10, 1, 5);
/// assert_eq!(level.start(), Position::new(0, 9));
/// assert_eq!(level.target(), Position::new(9, 0));
/// assert!(level.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LevelDefinition {
    /// Side length of the square board
    pub size: u32,
    /// Fewest lava cells a generated field may contain
    pub min_hazards: usize,
    /// Most lava cells a generated field may contain
    pub max_hazards: usize,
}

impl LevelDefinition {
    /// Creates a level definition. Use [`LevelDefinition::validate`] before generating.
    pub const fn new(size: u32, min_hazards: usize, max_hazards: usize) -> Self {
        Self {
            size,
            min_hazards,
            max_hazards,
        }
    }

    /// The bottom-left starting cell.
    pub fn start(&self) -> Position {
        Position::new(0, self.size as i32 - 1)
    }

    /// The top-right goal cell.
    pub fn target(&self) -> Position {
        Position::new(self.size as i32 - 1, 0)
    }

    /// Number of cells that may hold lava: every cell except start and target.
    pub fn eligible_cells(&self) -> u64 {
        (self.size as u64 * self.size as u64).saturating_sub(2)
    }

    /// Rejects definitions that cannot be generated or cannot be played.
    ///
    /// Lava placement samples cells until enough distinct ones are found, so
    /// `max_hazards` must stay strictly below the number of eligible cells.
    pub fn validate(&self) -> HeatseekerResult<()> {
        if self.size > MAX_LEVEL_SIZE {
            return Err(HeatseekerError::Configuration(format!(
                "level size {} exceeds the maximum of {}",
                self.size, MAX_LEVEL_SIZE
            )));
        }
        if self.size < 2 {
            return Err(HeatseekerError::Configuration(format!(
                "level size {} is too small; start and target must differ",
                self.size
            )));
        }
        if self.min_hazards == 0 {
            return Err(HeatseekerError::Configuration(
                "min_hazards must be at least 1".to_string(),
            ));
        }
        if self.min_hazards > self.max_hazards {
            return Err(HeatseekerError::Configuration(format!(
                "min_hazards {} exceeds max_hazards {}",
                self.min_hazards, self.max_hazards
            )));
        }
        if self.max_hazards as u64 >= self.eligible_cells() {
            return Err(HeatseekerError::Configuration(format!(
                "max_hazards {} must be below {} on a {}x{} board",
                self.max_hazards,
                self.eligible_cells(),
                self.size,
                self.size
            )));
        }
        Ok(())
    }
}

/// Trait for procedural generators.
///
/// Generators are pure: all inputs arrive as arguments, including the random
/// source, so tests can drive them with seeded or scripted generators.
pub trait Generator<T> {
    /// Generates content for the given level.
    fn generate<R: Rng + ?Sized>(&self, level: &LevelDefinition, rng: &mut R)
        -> HeatseekerResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, level: &LevelDefinition) -> HeatseekerResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use crate::HazardSet;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Creates a seeded random number generator.
    pub fn create_rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    /// Draws a seed from system entropy, for runs started without one.
    pub fn entropy_seed() -> u64 {
        rand::random()
    }

    /// Checks that every lava cell is on the board and that start and target are clear.
    pub fn check_placement(hazards: &HazardSet, level: &LevelDefinition) -> HeatseekerResult<()> {
        if hazards.contains(level.start()) {
            return Err(HeatseekerError::InvalidState(format!(
                "start cell {} holds lava",
                level.start()
            )));
        }
        if hazards.contains(level.target()) {
            return Err(HeatseekerError::InvalidState(format!(
                "target cell {} holds lava",
                level.target()
            )));
        }
        if let Some(outside) = hazards.iter().find(|cell| !cell.in_bounds(level.size)) {
            return Err(HeatseekerError::InvalidState(format!(
                "lava cell {} is outside the {}x{} board",
                outside, level.size, level.size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HazardSet;

    #[test]
    fn test_level_corners() {
        let level = LevelDefinition::new(32, 40, 100);
        assert_eq!(level.start(), Position::new(0, 31));
        assert_eq!(level.target(), Position::new(31, 0));
        assert_eq!(level.eligible_cells(), 32 * 32 - 2);
    }

    #[test]
    fn test_level_validation() {
        assert!(LevelDefinition::new(10, 1, 5).validate().is_ok());
        assert!(LevelDefinition::new(3, 1, 6).validate().is_ok());
        assert!(LevelDefinition::new(1, 1, 1).validate().is_err());
        assert!(LevelDefinition::new(10, 0, 5).validate().is_err());
        assert!(LevelDefinition::new(10, 6, 5).validate().is_err());
        assert!(LevelDefinition::new(3, 1, 7).validate().is_err());
        assert!(LevelDefinition::new(3, 1, 8).validate().is_err());
        assert!(LevelDefinition::new(MAX_LEVEL_SIZE, 1, 5).validate().is_ok());
        assert!(LevelDefinition::new(MAX_LEVEL_SIZE + 1, 1, 5).validate().is_err());
        assert!(LevelDefinition::new(3_000_000_000, 1, 5).validate().is_err());
    }

    #[test]
    fn test_utils_rng_is_deterministic() {
        use rand::Rng;

        let mut a = utils::create_rng(12345);
        let mut b = utils::create_rng(12345);
        let xs: Vec<u32> = (0..8).map(|_| a.gen()).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.gen()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_check_placement() {
        let level = LevelDefinition::new(10, 1, 5);
        let ok: HazardSet = [Position::new(4, 4)].into_iter().collect();
        assert!(utils::check_placement(&ok, &level).is_ok());

        let on_start: HazardSet = [level.start()].into_iter().collect();
        assert!(utils::check_placement(&on_start, &level).is_err());

        let on_target: HazardSet = [level.target()].into_iter().collect();
        assert!(utils::check_placement(&on_target, &level).is_err());

        let outside: HazardSet = [Position::new(10, 2)].into_iter().collect();
        assert!(utils::check_placement(&outside, &level).is_err());
    }
}

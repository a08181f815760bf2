//! # Lava Placement
//!
//! Randomized lava fields by rejection sampling.
//!
//! The generator draws a target count from the level's inclusive range, then
//! draws uniform cells until that many distinct eligible cells are chosen.
//! Start and target cells are never eligible.

use crate::generation::utils;
use crate::{
    Generator, HazardSet, HeatseekerError, HeatseekerResult, LevelDefinition, Position,
};
use log::debug;
use rand::Rng;

/// Places lava for a level.
///
/// # Examples
///
/// ```
/// use heatseeker::{Generator, HazardFieldGenerator, LevelDefinition};
/// use heatseeker::generation::utils::create_rng;
///
/// let level = LevelDefinition::new(10, 1, 5);
/// let mut rng = create_rng(7);
/// let lava = HazardFieldGenerator::new().generate(&level, &mut rng).unwrap();
/// assert!((1..=5).contains(&lava.len()));
/// assert!(!lava.contains(level.start()));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HazardFieldGenerator;

impl HazardFieldGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Draws a uniformly random cell anywhere on the board.
    fn random_cell<R: Rng + ?Sized>(level: &LevelDefinition, rng: &mut R) -> Position {
        let size = level.size as i32;
        Position::new(rng.gen_range(0..size), rng.gen_range(0..size))
    }
}

impl Generator<HazardSet> for HazardFieldGenerator {
    fn generate<R: Rng + ?Sized>(
        &self,
        level: &LevelDefinition,
        rng: &mut R,
    ) -> HeatseekerResult<HazardSet> {
        // An overfull level would never finish sampling
        level.validate()?;

        let target_count = rng.gen_range(level.min_hazards..=level.max_hazards);
        let start = level.start();
        let target = level.target();

        let mut hazards = HazardSet::with_capacity(target_count);
        let mut draws: u64 = 0;
        while hazards.len() < target_count {
            let cell = Self::random_cell(level, rng);
            draws += 1;
            if cell != start && cell != target {
                hazards.insert(cell);
            }
        }

        debug!(
            "{}: placed {} lava cells on {}x{} in {} draws",
            self.generator_type(),
            hazards.len(),
            level.size,
            level.size,
            draws
        );

        self.validate(&hazards, level)?;
        Ok(hazards)
    }

    fn validate(&self, content: &HazardSet, level: &LevelDefinition) -> HeatseekerResult<()> {
        if !(level.min_hazards..=level.max_hazards).contains(&content.len()) {
            return Err(HeatseekerError::InvalidState(format!(
                "generated {} lava cells, expected {}..={}",
                content.len(),
                level.min_hazards,
                level.max_hazards
            )));
        }
        utils::check_placement(content, level)
    }

    fn generator_type(&self) -> &'static str {
        "hazard-field"
    }
}

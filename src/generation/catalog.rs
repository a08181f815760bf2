//! # Level Catalog
//!
//! The ordered sequence of levels a run climbs through.

use crate::{HeatseekerError, HeatseekerResult, LevelDefinition};

/// The ten shipped levels, easiest first.
pub const CANONICAL_LEVELS: [LevelDefinition; 10] = [
    LevelDefinition::new(10, 1, 5),
    LevelDefinition::new(10, 5, 15),
    LevelDefinition::new(20, 20, 40),
    LevelDefinition::new(32, 40, 100),
    LevelDefinition::new(40, 100, 200),
    LevelDefinition::new(50, 250, 750),
    LevelDefinition::new(64, 400, 800),
    LevelDefinition::new(64, 800, 1600),
    LevelDefinition::new(100, 1600, 2400),
    LevelDefinition::new(100, 2000, 5000),
];

/// A validated, non-empty, ordered list of levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelCatalog {
    levels: Vec<LevelDefinition>,
}

impl LevelCatalog {
    /// Builds a catalog, rejecting it if it is empty or any level is unplayable.
    pub fn new(levels: Vec<LevelDefinition>) -> HeatseekerResult<Self> {
        if levels.is_empty() {
            return Err(HeatseekerError::Configuration(
                "level catalog is empty".to_string(),
            ));
        }
        for (index, level) in levels.iter().enumerate() {
            level.validate().map_err(|err| {
                HeatseekerError::Configuration(format!("level {}: {}", index, err))
            })?;
        }
        Ok(Self { levels })
    }

    /// The shipped catalog.
    ///
    /// # Examples
    ///
    /// ```
    /// use heatseeker::LevelCatalog;
    ///
    /// let catalog = LevelCatalog::canonical();
    /// assert_eq!(catalog.len(), 10);
    /// assert_eq!(catalog.get(0).unwrap().size, 10);
    /// assert!(catalog.get(10).is_err());
    /// ```
    pub fn canonical() -> Self {
        Self {
            levels: CANONICAL_LEVELS.to_vec(),
        }
    }

    /// Looks up a level by its 0-based index.
    pub fn get(&self, index: usize) -> HeatseekerResult<&LevelDefinition> {
        self.levels.get(index).ok_or_else(|| {
            HeatseekerError::Configuration(format!(
                "level index {} out of range (catalog has {} levels)",
                index,
                self.levels.len()
            ))
        })
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always false; a catalog holds at least one level.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Index of the last level.
    pub fn final_index(&self) -> usize {
        self.levels.len() - 1
    }

    pub fn is_final(&self, index: usize) -> bool {
        index == self.final_index()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelDefinition> {
        self.levels.iter()
    }
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self::canonical()
    }
}

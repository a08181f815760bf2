//! # Game Configuration
//!
//! Crate-wide constants and the optional JSON configuration file.

use crate::{HeatseekerError, HeatseekerResult, LevelCatalog, LevelDefinition};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Integer value recorded for the lava cell that ended a level.
pub const LOSS_SENTINEL: i8 = -1;

/// Number of entries shown on the leaderboard.
pub const LEADERBOARD_SIZE: usize = 10;

/// Longest display name accepted by the leaderboard, in characters.
pub const MAX_PLAYER_NAME_LEN: usize = 24;

/// Number of messages kept by the text display.
pub const MESSAGE_LOG_CAPACITY: usize = 8;

/// Settings for the automated player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoplayConfig {
    /// Moves allowed on a single attempt before the autoplayer gives up on it
    pub max_moves_per_level: u32,
    /// Extra attempts granted after losing a level
    pub max_retries_per_level: u32,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            max_moves_per_level: 20_000,
            max_retries_per_level: 3,
        }
    }
}

/// Top-level configuration, usually read from a JSON file.
///
/// Every field is optional in the file; anything missing falls back to the
/// defaults below. Command line flags override file values.
///
/// # Examples
///
/// ```
/// use heatseeker::GameConfig;
///
/// let config = GameConfig::from_json_str(r#"{ "seed": 7 }"#).unwrap();
/// assert_eq!(config.seed, Some(7));
/// assert_eq!(config.catalog().unwrap().len(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seed for lava generation; random when absent
    pub seed: Option<u64>,
    /// Replacement level catalog; the canonical ten levels when absent
    pub levels: Option<Vec<LevelDefinition>>,
    /// Display name submitted to the leaderboard
    pub player_name: Option<String>,
    /// Automated player limits
    pub autoplay: AutoplayConfig,
    /// Number of leaderboard entries to fetch and display
    pub leaderboard_size: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            levels: None,
            player_name: None,
            autoplay: AutoplayConfig::default(),
            leaderboard_size: LEADERBOARD_SIZE,
        }
    }
}

impl GameConfig {
    /// Reads and validates a configuration file.
    pub fn from_file(path: &Path) -> HeatseekerResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Parses and validates configuration JSON.
    pub fn from_json_str(content: &str) -> HeatseekerResult<Self> {
        let config: GameConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every setting, reporting all problems at once.
    pub fn validate(&self) -> HeatseekerResult<()> {
        let mut errors = Vec::new();

        if self.leaderboard_size == 0 {
            errors.push("leaderboard_size must be at least 1".to_string());
        }
        if self.autoplay.max_moves_per_level == 0 {
            errors.push("autoplay.max_moves_per_level must be at least 1".to_string());
        }
        if let Err(err) = self.catalog() {
            errors.push(err.to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(HeatseekerError::Configuration(errors.join("; ")))
        }
    }

    /// Builds the level catalog this configuration selects.
    pub fn catalog(&self) -> HeatseekerResult<LevelCatalog> {
        match &self.levels {
            Some(levels) => LevelCatalog::new(levels.clone()),
            None => Ok(LevelCatalog::canonical()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.leaderboard_size, LEADERBOARD_SIZE);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            GameConfig::from_json_str(r#"{ "autoplay": { "max_retries_per_level": 0 } }"#).unwrap();
        assert_eq!(config.autoplay.max_retries_per_level, 0);
        assert_eq!(config.autoplay.max_moves_per_level, 20_000);
    }

    #[test]
    fn test_custom_catalog() {
        let json = r#"{ "levels": [ { "size": 5, "min_hazards": 1, "max_hazards": 3 } ] }"#;
        let config = GameConfig::from_json_str(json).unwrap();
        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(0).unwrap().size, 5);
    }

    #[test]
    fn test_overfull_level_rejected() {
        // 3x3 has only 7 eligible cells
        let json = r#"{ "levels": [ { "size": 3, "min_hazards": 1, "max_hazards": 7 } ] }"#;
        let err = GameConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, HeatseekerError::Configuration(_)));
    }

    #[test]
    fn test_oversized_level_rejected() {
        let json =
            r#"{ "levels": [ { "size": 3000000000, "min_hazards": 1, "max_hazards": 5 } ] }"#;
        let err = GameConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, HeatseekerError::Configuration(_)));
        assert!(err.to_string().contains("exceeds the maximum"));
    }

    #[test]
    fn test_errors_are_collected() {
        let config = GameConfig {
            leaderboard_size: 0,
            levels: Some(Vec::new()),
            ..GameConfig::default()
        };
        let message = config.validate().unwrap_err().to_string();
        assert!(message.contains("leaderboard_size"));
        assert!(message.contains("empty"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "seed": 99, "player_name": "Ada" }}"#).unwrap();

        let config = GameConfig::from_file(file.path()).unwrap();
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.player_name.as_deref(), Some("Ada"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GameConfig::from_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, HeatseekerError::Io(_)));
    }
}

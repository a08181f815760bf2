//! Integration test to ensure a run can start up without errors.

use heatseeker::{
    CellReading, GameConfig, GameState, GameStatus, HeatseekerResult, LevelCatalog, Position,
};

#[test]
fn test_basic_startup() -> HeatseekerResult<()> {
    let game_state = GameState::new(LevelCatalog::canonical(), 12345)?;

    assert_eq!(game_state.level_index(), 0);
    assert_eq!(game_state.catalog_len(), 10);
    assert_eq!(game_state.status(), GameStatus::Playing);
    assert_eq!(game_state.position(), Position::new(0, 9));
    assert_eq!(game_state.level_moves(), 0);
    assert_eq!(game_state.total_moves(), 0);

    // Only the start cell is known, and it is never lava
    assert_eq!(game_state.visited().len(), 1);
    assert!(matches!(
        game_state.reading_at(Position::new(0, 9)),
        Some(CellReading::Heat(heat)) if heat <= 8
    ));

    let level = game_state.level();
    assert!((level.min_hazards..=level.max_hazards).contains(&game_state.hazard_count()));
    assert!(game_state.revealed_hazards().is_none());

    Ok(())
}

#[test]
fn test_startup_from_default_config() -> HeatseekerResult<()> {
    let config = GameConfig::from_json_str(r#"{ "seed": 99, "player_name": "Ada" }"#)?;
    let game_state = GameState::new(config.catalog()?, config.seed.unwrap_or_default())?;

    assert_eq!(game_state.catalog_len(), 10);
    assert_eq!(config.player_name.as_deref(), Some("Ada"));
    Ok(())
}

#[test]
fn test_startup_from_custom_catalog() -> HeatseekerResult<()> {
    let config = GameConfig::from_json_str(
        r#"{ "levels": [ { "size": 4, "min_hazards": 1, "max_hazards": 2 } ] }"#,
    )?;
    let game_state = GameState::new(config.catalog()?, 1)?;

    assert_eq!(game_state.catalog_len(), 1);
    assert!(game_state.is_final_level());
    assert_eq!(game_state.position(), Position::new(0, 3));
    Ok(())
}

#[test]
fn test_unplayable_catalog_is_rejected() {
    let dense = r#"{ "levels": [ { "size": 3, "min_hazards": 1, "max_hazards": 7 } ] }"#;
    assert!(GameConfig::from_json_str(dense).is_err());

    let empty = r#"{ "levels": [] }"#;
    assert!(GameConfig::from_json_str(empty).is_err());
}

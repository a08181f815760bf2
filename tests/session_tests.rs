//! Text sessions driven end to end from scripted input.

use heatseeker::{
    AutoplayConfig, GameConfig, GameSession, GameState, GameStatus, HazardSet, InMemoryLeaderboard,
    LeaderboardClient, LevelCatalog, LevelDefinition, Position, SceneType,
};
use std::io::Cursor;

fn script(commands: &[&str]) -> Cursor<Vec<u8>> {
    let mut text = commands.join("\n");
    text.push('\n');
    Cursor::new(text.into_bytes())
}

/// Up nine times then right nine times crosses a clear level 1.
fn crossing() -> Vec<&'static str> {
    let mut commands = vec!["w"; 9];
    commands.extend(vec!["d"; 9]);
    commands
}

fn clear_first_level(catalog: LevelCatalog) -> GameState {
    let mut game = GameState::new(catalog, 77).unwrap();
    game.initialize_level_with_hazards(0, HazardSet::new()).unwrap();
    game
}

fn single_level() -> LevelCatalog {
    LevelCatalog::new(vec![LevelDefinition::new(10, 1, 5)]).unwrap()
}

#[test]
fn test_win_then_next_level() {
    let game = clear_first_level(LevelCatalog::canonical());
    let mut session = GameSession::new(game, LeaderboardClient::disconnected(), &GameConfig::default());

    let mut commands = crossing();
    commands.push("n");
    let mut output = Vec::new();
    session.run(script(&commands), &mut output).unwrap();

    assert_eq!(session.scene(), SceneType::Playing);
    assert_eq!(session.game_state().level_index(), 1);
    assert_eq!(session.game_state().total_moves(), 18);
    assert!(session
        .display()
        .messages
        .iter()
        .any(|message| message == "Level 1 complete in 18 moves"));

    let screen = String::from_utf8(output).unwrap();
    assert!(screen.contains("[level complete]"));
    assert!(screen.contains("Level 2/10"));
}

#[test]
fn test_lava_ends_level_until_retry() {
    let mut game = GameState::new(LevelCatalog::canonical(), 5).unwrap();
    let lava: HazardSet = [Position::new(0, 8)].into_iter().collect();
    game.initialize_level_with_hazards(0, lava).unwrap();
    let mut session = GameSession::new(game, LeaderboardClient::disconnected(), &GameConfig::default());

    session.run(script(&["w", "d", "n"]), Vec::new()).unwrap();
    assert_eq!(session.scene(), SceneType::GameOver);
    assert_eq!(session.game_state().status(), GameStatus::Lost);
    assert_eq!(session.game_state().level_moves(), 1);

    session.run(script(&["r"]), Vec::new()).unwrap();
    assert_eq!(session.scene(), SceneType::Playing);
    assert_eq!(session.game_state().level_moves(), 0);
    assert_eq!(session.game_state().total_moves(), 1);
}

#[test]
fn test_quit_stops_reading() {
    let game = clear_first_level(LevelCatalog::canonical());
    let mut session = GameSession::new(game, LeaderboardClient::disconnected(), &GameConfig::default());

    session.run(script(&["w", "q", "w", "w"]), Vec::new()).unwrap();
    assert_eq!(session.game_state().level_moves(), 1);
}

#[test]
fn test_unknown_commands_are_reported() {
    let game = clear_first_level(LevelCatalog::canonical());
    let mut session = GameSession::new(game, LeaderboardClient::disconnected(), &GameConfig::default());

    session.run(script(&["jump", "?"]), Vec::new()).unwrap();
    let messages = &session.display().messages;
    assert!(messages.iter().any(|m| m.starts_with("Unknown command 'jump'")));
    assert!(messages.iter().any(|m| m.starts_with("Commands:")));
}

#[tokio::test]
async fn test_finished_run_reaches_leaderboard() {
    let (client, _task) = LeaderboardClient::spawn(InMemoryLeaderboard::new());
    let game = clear_first_level(single_level());
    let mut session = GameSession::new(game, client, &GameConfig::default());

    session.run(script(&crossing()), Vec::new()).unwrap();
    assert_eq!(session.scene(), SceneType::RunComplete);

    let mut output = Vec::new();
    session.finish(&mut output).await.unwrap();

    let receipt = session.last_receipt().expect("progress should be recorded");
    assert_eq!(receipt.rank, 1);
    assert!(receipt.should_prompt_name);
    assert_eq!(receipt.entry.level_reached, 1);
    assert_eq!(receipt.entry.total_moves, 18);
    assert!(receipt.entry.is_human);

    // Unnamed runs stay off the board
    assert_eq!(String::from_utf8(output).unwrap(), "Leaderboard is empty\n");
}

#[tokio::test]
async fn test_name_given_after_finishing_is_recorded() {
    let (client, _task) = LeaderboardClient::spawn(InMemoryLeaderboard::new());
    let game = clear_first_level(single_level());
    let mut session = GameSession::new(game, client, &GameConfig::default());

    let mut commands = crossing();
    commands.push("name Ada");
    session.run(script(&commands), Vec::new()).unwrap();

    let mut output = Vec::new();
    session.finish(&mut output).await.unwrap();

    let receipt = session.last_receipt().unwrap();
    assert_eq!(receipt.entry.player_name, "Ada");
    assert!(!receipt.should_prompt_name);
    assert!(session.session_id().is_some());

    let board = String::from_utf8(output).unwrap();
    assert!(board.contains("Ada"));
    assert!(board.contains("18"));
}

#[tokio::test]
async fn test_unavailable_leaderboard_does_not_block_play() {
    let game = clear_first_level(single_level());
    let mut session = GameSession::new(game, LeaderboardClient::disconnected(), &GameConfig::default());

    session.run(script(&crossing()), Vec::new()).unwrap();
    assert_eq!(session.scene(), SceneType::RunComplete);

    let mut output = Vec::new();
    session.finish(&mut output).await.unwrap();
    assert!(session.last_receipt().is_none());
    assert_eq!(String::from_utf8(output).unwrap(), "Leaderboard unavailable\n");
}

#[tokio::test]
async fn test_autoplay_finishes_and_reports_as_bot() {
    let (client, _task) = LeaderboardClient::spawn(InMemoryLeaderboard::new());
    let config = GameConfig {
        autoplay: AutoplayConfig {
            max_moves_per_level: 500,
            max_retries_per_level: 0,
        },
        ..GameConfig::default()
    };
    // Every reading is 0 on a clear board, so the whole board is known safe
    let game = clear_first_level(single_level());
    let mut session = GameSession::new(game, client, &config);
    session.enable_autoplay();

    session.run(Cursor::new(Vec::new()), Vec::new()).unwrap();
    assert!(!session.autoplay_enabled());
    assert_eq!(session.scene(), SceneType::RunComplete);
    assert_eq!(session.game_state().total_moves(), 18);

    session.finish(Vec::new()).await.unwrap();
    let receipt = session.last_receipt().expect("autoplay run should be recorded");
    assert!(!receipt.entry.is_human);
    assert_eq!(receipt.entry.level_reached, 1);
    assert_eq!(receipt.entry.total_moves, 18);
}

#[tokio::test]
async fn test_practice_start_never_reaches_leaderboard() {
    let (client, _task) = LeaderboardClient::spawn(InMemoryLeaderboard::new());
    let catalog = LevelCatalog::new(vec![
        LevelDefinition::new(10, 1, 5),
        LevelDefinition::new(10, 1, 5),
    ])
    .unwrap();
    let mut game = GameState::new(catalog, 77).unwrap();
    game.start_practice(1).unwrap();
    game.initialize_level_with_hazards(1, HazardSet::new()).unwrap();
    let config = GameConfig {
        player_name: Some("Ada".to_string()),
        ..GameConfig::default()
    };
    let mut session = GameSession::new(game, client, &config);

    session.run(script(&crossing()), Vec::new()).unwrap();
    assert_eq!(session.scene(), SceneType::RunComplete);

    let mut output = Vec::new();
    session.finish(&mut output).await.unwrap();
    assert!(session.last_receipt().is_none());
    assert_eq!(String::from_utf8(output).unwrap(), "Leaderboard is empty\n");
}

//! # Session Management
//!
//! Drives one player's runs: reads input, applies it to the game state,
//! reports progress to the leaderboard, and renders the result.
//!
//! The session owns exactly one [`GameState`]. Leaderboard traffic goes
//! through a [`LeaderboardClient`] and is only ever polled, so gameplay keeps
//! going whether or not the service answers.

use crate::input::help_text;
use crate::{
    AutoplayConfig, Autoplayer, GameConfig, GameEvent, GameState, GameStatus, HeatseekerResult,
    InputHandler, LeaderboardClient, PendingReply, PlayerInput, ProgressReceipt, ProgressReport,
    RunProgress, SessionId, TextDisplay,
};
use log::{debug, info, warn};
use std::io::{BufRead, Write};

/// Represents the current scene in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneType {
    /// Normal gameplay
    Playing,
    /// A level was won and the next one is waiting
    LevelComplete,
    /// The player stepped on lava
    GameOver,
    /// The final level was won
    RunComplete,
}

enum SessionSlot {
    Pending(PendingReply<SessionId>),
    Ready(SessionId),
    Unavailable,
}

/// The main session object that coordinates a player's runs.
pub struct GameSession {
    current_scene: SceneType,
    game_state: GameState,
    display: TextDisplay,
    input_handler: InputHandler,
    leaderboard: LeaderboardClient,
    session: SessionSlot,
    outbox: Option<RunProgress>,
    last_reported: Option<RunProgress>,
    receipts: Vec<PendingReply<ProgressReceipt>>,
    last_receipt: Option<ProgressReceipt>,
    player_name: Option<String>,
    autoplayer: Option<Autoplayer>,
    autoplay_config: AutoplayConfig,
    autoplay_used: bool,
    retries_used: u32,
    dirty: bool,
}

impl GameSession {
    /// Creates a session around a freshly started run and registers it with the leaderboard.
    pub fn new(game_state: GameState, leaderboard: LeaderboardClient, config: &GameConfig) -> Self {
        let session = SessionSlot::Pending(leaderboard.start_session());
        let mut display = TextDisplay::default();
        display.add_message("Welcome to Heatseeker!".to_string());
        display.add_message(
            "Walk from the bottom-left to G. Numbers count the lava around you. ? for help"
                .to_string(),
        );
        if game_state.is_practice() {
            display.add_message("Practice run: progress is not recorded".to_string());
        }

        Self {
            current_scene: SceneType::Playing,
            game_state,
            display,
            input_handler: InputHandler::new(),
            leaderboard,
            session,
            outbox: None,
            last_reported: None,
            receipts: Vec::new(),
            last_receipt: None,
            player_name: config.player_name.clone(),
            autoplayer: None,
            autoplay_config: config.autoplay.clone(),
            autoplay_used: false,
            retries_used: 0,
            dirty: true,
        }
    }

    /// Hands control to the automated player.
    pub fn enable_autoplay(&mut self) {
        self.autoplayer = Some(Autoplayer::new());
        self.autoplay_used = true;
        self.display.add_message("Autoplay on".to_string());
    }

    pub fn autoplay_enabled(&self) -> bool {
        self.autoplayer.is_some()
    }

    pub fn scene(&self) -> SceneType {
        self.current_scene
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    pub fn display(&self) -> &TextDisplay {
        &self.display
    }

    pub fn leaderboard(&self) -> &LeaderboardClient {
        &self.leaderboard
    }

    /// The most recent answer from the leaderboard, if any.
    pub fn last_receipt(&self) -> Option<&ProgressReceipt> {
        self.last_receipt.as_ref()
    }

    pub fn session_id(&self) -> Option<SessionId> {
        match self.session {
            SessionSlot::Ready(id) => Some(id),
            _ => None,
        }
    }

    /// Reads commands until the player quits or input ends.
    pub fn run<I: BufRead, O: Write>(&mut self, mut input: I, mut output: O) -> HeatseekerResult<()> {
        self.render(&mut output)?;

        loop {
            self.poll_leaderboard();

            if self.autoplay_enabled() {
                if !self.autoplay_step()? {
                    self.autoplayer = None;
                    self.dirty = true;
                }
                if self.dirty {
                    self.render(&mut output)?;
                }
                continue;
            }

            write!(output, "> ")?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                debug!("Input closed");
                break;
            }

            match self.input_handler.parse_line(&line) {
                Some(player_input) => {
                    if self.handle_input(player_input)? {
                        break;
                    }
                }
                None if line.trim().is_empty() => {}
                None => {
                    self.display
                        .add_message(format!("Unknown command '{}'; ? for help", line.trim()));
                }
            }
            self.render(&mut output)?;
        }

        info!("Session ended after {} moves", self.game_state.total_moves());
        Ok(())
    }

    fn render<O: Write>(&mut self, output: &mut O) -> HeatseekerResult<()> {
        let screen = self.display.render_game(&self.game_state);
        writeln!(output, "{}", screen)?;
        self.dirty = false;
        Ok(())
    }

    /// Applies one player input. Returns true if the player asked to quit.
    pub fn handle_input(&mut self, input: PlayerInput) -> HeatseekerResult<bool> {
        match input {
            PlayerInput::Quit => return Ok(true),

            PlayerInput::Help => {
                self.display.add_message(format!("Commands:\n{}", help_text()));
            }

            PlayerInput::Move(direction) => {
                let events = self.game_state.move_player(direction);
                self.process_game_events(events);
            }

            PlayerInput::NextLevel => {
                if self.game_state.can_advance() {
                    let events = self.game_state.advance_level()?;
                    self.process_game_events(events);
                } else {
                    self.display
                        .add_message("Finish this level before moving on".to_string());
                }
            }

            PlayerInput::RetryLevel => {
                let events = self.game_state.restart_level()?;
                self.process_game_events(events);
            }

            PlayerInput::NewRun => {
                self.start_new_run()?;
            }

            PlayerInput::ToggleAutoplay => {
                if self.autoplay_enabled() {
                    self.autoplayer = None;
                    self.display.add_message("Autoplay off".to_string());
                } else {
                    self.enable_autoplay();
                }
            }

            PlayerInput::SetName(name) => {
                self.set_player_name(&name);
            }
        }
        Ok(false)
    }

    /// Makes one automated move or transition. Returns false once there is nothing left to do.
    pub fn autoplay_step(&mut self) -> HeatseekerResult<bool> {
        let Some(autoplayer) = self.autoplayer else {
            return Ok(false);
        };

        match self.game_state.status() {
            GameStatus::Playing => {
                if self.game_state.level_moves() >= self.autoplay_config.max_moves_per_level {
                    self.display
                        .add_message("Autoplay gave up on this level".to_string());
                    return Ok(false);
                }
                match autoplayer.next_direction(&self.game_state) {
                    Some(direction) => {
                        let events = self.game_state.move_player(direction);
                        self.process_game_events(events);
                        Ok(true)
                    }
                    None => {
                        self.display
                            .add_message("Autoplay found no way forward".to_string());
                        Ok(false)
                    }
                }
            }
            GameStatus::Won if self.game_state.can_advance() => {
                self.retries_used = 0;
                let events = self.game_state.advance_level()?;
                self.process_game_events(events);
                Ok(true)
            }
            GameStatus::Won => Ok(false),
            GameStatus::Lost if self.game_state.is_final_level() => Ok(false),
            GameStatus::Lost => {
                if self.retries_used >= self.autoplay_config.max_retries_per_level {
                    self.display.add_message("Autoplay is out of retries".to_string());
                    return Ok(false);
                }
                self.retries_used += 1;
                let events = self.game_state.restart_level()?;
                self.process_game_events(events);
                Ok(true)
            }
        }
    }

    /// Processes game events, updating messages, scene, and leaderboard reports.
    fn process_game_events(&mut self, events: Vec<GameEvent>) {
        for event in &events {
            match event {
                GameEvent::LevelStarted {
                    level, start_heat, ..
                } => {
                    self.display.add_message(format!(
                        "Level {} begins. Heat at the start: {}",
                        level + 1,
                        start_heat
                    ));
                    self.dirty = true;
                }
                GameEvent::SteppedOnLava { position, .. } => {
                    self.display
                        .add_message(format!("Lava at {}! Type r to retry", position));
                    self.dirty = true;
                }
                GameEvent::LevelCompleted { level, moves } => {
                    self.display.add_message(format!(
                        "Level {} complete in {} moves",
                        level + 1,
                        moves
                    ));
                    self.dirty = true;
                }
                GameEvent::RunCompleted { total_moves } => {
                    self.display.add_message(format!(
                        "Every level crossed in {} moves!",
                        total_moves
                    ));
                }
                GameEvent::RunReset => {
                    self.display.add_message("New run started".to_string());
                }
                GameEvent::PlayerMoved { .. } | GameEvent::HeatRevealed { .. } => {}
            }
        }

        self.current_scene = match self.game_state.status() {
            GameStatus::Playing => SceneType::Playing,
            GameStatus::Won if self.game_state.is_run_complete() => SceneType::RunComplete,
            GameStatus::Won => SceneType::LevelComplete,
            GameStatus::Lost => SceneType::GameOver,
        };

        let ended_level = events.iter().any(|event| {
            matches!(
                event,
                GameEvent::LevelCompleted { .. } | GameEvent::SteppedOnLava { .. }
            )
        });
        if ended_level {
            if let Some(progress) = self.game_state.pending_report() {
                self.submit_progress(progress);
            }
        }
    }

    fn start_new_run(&mut self) -> HeatseekerResult<()> {
        let events = self.game_state.reset_run()?;
        self.session = SessionSlot::Pending(self.leaderboard.start_session());
        self.outbox = None;
        self.last_reported = None;
        self.autoplay_used = self.autoplay_enabled();
        self.retries_used = 0;
        self.process_game_events(events);
        info!("Started a new run");
        Ok(())
    }

    fn set_player_name(&mut self, name: &str) {
        match crate::normalize_player_name(name) {
            Some(name) => {
                self.display.add_message(format!("Playing as {}", name));
                self.player_name = Some(name);
                // Attach the name to anything already on the board
                if let Some(progress) = self.last_reported {
                    self.submit_progress(progress);
                }
            }
            None => self.display.add_message("Name cannot be empty".to_string()),
        }
    }

    fn submit_progress(&mut self, progress: RunProgress) {
        self.last_reported = Some(progress);
        self.outbox = Some(progress);
        self.flush_outbox();
    }

    fn build_report(&self, session_id: SessionId, progress: RunProgress) -> ProgressReport {
        let mut report =
            ProgressReport::new(session_id, progress).with_is_human(!self.autoplay_used);
        if let Some(name) = &self.player_name {
            report = report.with_player_name(name.clone());
        }
        report
    }

    fn flush_outbox(&mut self) {
        self.resolve_session();
        match self.session {
            SessionSlot::Ready(session_id) => {
                if let Some(progress) = self.outbox.take() {
                    let report = self.build_report(session_id, progress);
                    self.receipts.push(self.leaderboard.record_progress(report));
                }
            }
            SessionSlot::Unavailable => {
                if self.outbox.take().is_some() {
                    debug!("No leaderboard session; progress not reported");
                }
            }
            // Sent once the session id arrives
            SessionSlot::Pending(_) => {}
        }
    }

    fn resolve_session(&mut self) {
        if let SessionSlot::Pending(pending) = &mut self.session {
            match pending.try_take() {
                Some(Ok(session_id)) => {
                    info!("Leaderboard session {}", session_id);
                    self.session = SessionSlot::Ready(session_id);
                }
                Some(Err(err)) => {
                    warn!("Leaderboard session unavailable: {}", err);
                    self.session = SessionSlot::Unavailable;
                }
                None => {}
            }
        }
    }

    /// Collects any leaderboard replies that have arrived, without waiting.
    pub fn poll_leaderboard(&mut self) {
        self.flush_outbox();

        let mut still_pending = Vec::new();
        for mut pending in std::mem::take(&mut self.receipts) {
            match pending.try_take() {
                Some(result) => self.handle_receipt(result),
                None => still_pending.push(pending),
            }
        }
        self.receipts = still_pending;
    }

    /// Waits for every outstanding leaderboard request to finish.
    pub async fn flush_leaderboard(&mut self) {
        if let SessionSlot::Pending(pending) =
            std::mem::replace(&mut self.session, SessionSlot::Unavailable)
        {
            self.session = match pending.wait().await {
                Ok(session_id) => SessionSlot::Ready(session_id),
                Err(err) => {
                    warn!("Leaderboard session unavailable: {}", err);
                    SessionSlot::Unavailable
                }
            };
        }
        self.flush_outbox();

        for pending in std::mem::take(&mut self.receipts) {
            let result = pending.wait().await;
            self.handle_receipt(result);
        }
    }

    /// Settles outstanding reports, then writes the current leaderboard.
    pub async fn finish<O: Write>(&mut self, mut output: O) -> HeatseekerResult<()> {
        self.flush_leaderboard().await;

        match self.leaderboard.fetch_leaderboard().wait().await {
            Ok(entries) => write!(output, "{}", TextDisplay::render_leaderboard(&entries))?,
            Err(err) => {
                warn!("Could not fetch leaderboard: {}", err);
                writeln!(output, "Leaderboard unavailable")?;
            }
        }
        output.flush()?;
        Ok(())
    }

    fn handle_receipt(&mut self, result: HeatseekerResult<ProgressReceipt>) {
        match result {
            Ok(receipt) => {
                if receipt.should_prompt_name {
                    self.display.add_message(format!(
                        "Rank #{} on the leaderboard! Type 'name <you>' to claim it",
                        receipt.rank
                    ));
                } else {
                    self.display
                        .add_message(format!("Leaderboard rank #{}", receipt.rank));
                }
                self.last_receipt = Some(receipt);
            }
            Err(err) => warn!("Progress not recorded: {}", err),
        }
    }
}

//! # Game State Module
//!
//! The run state machine: level setup, moves, win/loss detection, and level transitions.
//!
//! [`GameState`] exclusively owns everything that changes during a run. All
//! mutation goes through its operations, each of which returns the
//! [`GameEvent`]s it produced so front ends can react without inspecting
//! internals.

use crate::generation::utils;
use crate::{
    heat, try_move, try_move_named, CellReading, Direction, Generator, HazardFieldGenerator,
    HazardSet, HeatseekerError, HeatseekerResult, LevelCatalog, LevelDefinition, MoveOutcome,
    Position, RunProgress, RunStatistics, VisitedMap,
};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Status of the current level attempt.
///
/// `Won` and `Lost` are terminal until the level is restarted or advanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

/// Something that happened during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A fresh level attempt began
    LevelStarted {
        level: usize,
        start: Position,
        start_heat: u8,
    },
    /// The player stepped to a new cell
    PlayerMoved { from: Position, to: Position },
    /// A safe cell was entered and its heat recorded
    HeatRevealed { position: Position, heat: u8 },
    /// The player entered lava and lost the attempt
    SteppedOnLava {
        level: usize,
        position: Position,
        final_level: bool,
    },
    /// The player reached the target cell
    LevelCompleted { level: usize, moves: u32 },
    /// The final level was won
    RunCompleted { total_moves: u64 },
    /// All run progress was discarded
    RunReset,
}

/// Central state of one player's run.
///
/// The random source is injected so tests and replays can be deterministic;
/// [`GameState::new`] seeds a [`StdRng`].
///
/// # Examples
///
/// ```
/// use heatseeker::{Direction, GameState, GameStatus, LevelCatalog, Position};
///
/// let mut game = GameState::new(LevelCatalog::canonical(), 12345).unwrap();
/// assert_eq!(game.position(), Position::new(0, 9));
/// assert_eq!(game.status(), GameStatus::Playing);
/// assert_eq!(game.visited().len(), 1);
///
/// game.move_player(Direction::Left); // clamped, nothing happens
/// assert_eq!(game.level_moves(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct GameState<R = StdRng> {
    catalog: LevelCatalog,
    generator: HazardFieldGenerator,
    rng: R,
    level_index: usize,
    level: LevelDefinition,
    position: Position,
    hazards: HazardSet,
    visited: VisitedMap,
    status: GameStatus,
    statistics: RunStatistics,
    practice: bool,
}

impl GameState<StdRng> {
    /// Starts a run at level 0 with a seeded random source.
    pub fn new(catalog: LevelCatalog, seed: u64) -> HeatseekerResult<Self> {
        Self::with_rng(catalog, utils::create_rng(seed))
    }
}

impl<R: Rng> GameState<R> {
    /// Starts a run at level 0 drawing lava from the given random source.
    pub fn with_rng(catalog: LevelCatalog, rng: R) -> HeatseekerResult<Self> {
        let level = *catalog.get(0)?;
        let mut state = Self {
            catalog,
            generator: HazardFieldGenerator::new(),
            rng,
            level_index: 0,
            level,
            position: level.start(),
            hazards: HazardSet::new(),
            visited: VisitedMap::new(),
            status: GameStatus::Playing,
            statistics: RunStatistics::new(),
            practice: false,
        };
        state.initialize_level(0)?;
        Ok(state)
    }

    /// Begins a fresh attempt at `level_index` with newly generated lava.
    ///
    /// Per-level moves reset; run totals are untouched.
    pub fn initialize_level(&mut self, level_index: usize) -> HeatseekerResult<Vec<GameEvent>> {
        let level = *self.catalog.get(level_index)?;
        let hazards = self.generator.generate(&level, &mut self.rng)?;
        Ok(self.install_level(level_index, level, hazards))
    }

    /// Begins an attempt at `level_index` on a fixed lava field.
    ///
    /// The field may hold any number of cells but must stay on the board and
    /// keep the start and target clear.
    pub fn initialize_level_with_hazards(
        &mut self,
        level_index: usize,
        hazards: HazardSet,
    ) -> HeatseekerResult<Vec<GameEvent>> {
        let level = *self.catalog.get(level_index)?;
        utils::check_placement(&hazards, &level)?;
        Ok(self.install_level(level_index, level, hazards))
    }

    /// Steps the player one cell. Does nothing unless the level is being played.
    pub fn move_player(&mut self, direction: Direction) -> Vec<GameEvent> {
        if self.status != GameStatus::Playing {
            return Vec::new();
        }
        let outcome = try_move(self.position, direction, self.level.size);
        self.apply_move(outcome)
    }

    /// Steps the player by direction name. Unrecognized names are ignored.
    pub fn move_named(&mut self, direction: &str) -> Vec<GameEvent> {
        if self.status != GameStatus::Playing {
            return Vec::new();
        }
        let outcome = try_move_named(self.position, direction, self.level.size);
        self.apply_move(outcome)
    }

    /// Moves on to the next level after a win.
    pub fn advance_level(&mut self) -> HeatseekerResult<Vec<GameEvent>> {
        if self.status != GameStatus::Won {
            return Err(HeatseekerError::InvalidAction(format!(
                "cannot advance from level {} while {:?}",
                self.level_index, self.status
            )));
        }
        if self.is_final_level() {
            return Err(HeatseekerError::InvalidAction(
                "already on the final level".to_string(),
            ));
        }
        self.initialize_level(self.level_index + 1)
    }

    /// Replays the current level on a new lava field.
    pub fn restart_level(&mut self) -> HeatseekerResult<Vec<GameEvent>> {
        self.initialize_level(self.level_index)
    }

    /// Jumps to `level_index` for practice.
    ///
    /// Levels before it were never played, so nothing is reported to the
    /// leaderboard until the run is reset.
    pub fn start_practice(&mut self, level_index: usize) -> HeatseekerResult<Vec<GameEvent>> {
        let events = self.initialize_level(level_index)?;
        self.practice = true;
        info!("Practising level {}", level_index + 1);
        Ok(events)
    }

    /// Abandons the run and starts over from level 0 with zeroed counters.
    pub fn reset_run(&mut self) -> HeatseekerResult<Vec<GameEvent>> {
        let level = *self.catalog.get(0)?;
        let hazards = self.generator.generate(&level, &mut self.rng)?;

        let mut events = Vec::new();
        self.practice = false;
        self.emit(&mut events, GameEvent::RunReset);
        events.extend(self.install_level(0, level, hazards));
        info!("Run reset");
        Ok(events)
    }

    fn install_level(
        &mut self,
        level_index: usize,
        level: LevelDefinition,
        hazards: HazardSet,
    ) -> Vec<GameEvent> {
        let start = level.start();
        // Start heat always comes from the field being installed
        let start_heat = heat(start, &hazards);

        self.level_index = level_index;
        self.level = level;
        self.hazards = hazards;
        self.position = start;
        self.visited.clear();
        self.visited.insert(start, CellReading::Heat(start_heat));
        self.status = GameStatus::Playing;

        info!(
            "Level {} started: {}x{} board, {} lava cells",
            level_index + 1,
            level.size,
            level.size,
            self.hazards.len()
        );

        let mut events = Vec::new();
        self.emit(
            &mut events,
            GameEvent::LevelStarted {
                level: level_index,
                start,
                start_heat,
            },
        );
        events
    }

    fn apply_move(&mut self, outcome: MoveOutcome) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if !outcome.moved {
            return events;
        }

        let from = self.position;
        let to = outcome.destination;
        self.position = to;
        self.emit(&mut events, GameEvent::PlayerMoved { from, to });

        if self.hazards.contains(to) {
            self.visited.insert(to, CellReading::Lava);
            self.status = GameStatus::Lost;
            info!("Stepped on lava at {} on level {}", to, self.level_index + 1);
            let final_level = self.is_final_level();
            self.emit(
                &mut events,
                GameEvent::SteppedOnLava {
                    level: self.level_index,
                    position: to,
                    final_level,
                },
            );
        } else if to == self.level.target() {
            self.status = GameStatus::Won;
            info!(
                "Level {} completed in {} moves",
                self.level_index + 1,
                self.statistics.level_moves
            );
            let moves = self.statistics.level_moves;
            self.emit(
                &mut events,
                GameEvent::LevelCompleted {
                    level: self.level_index,
                    moves,
                },
            );
            if self.is_final_level() {
                let total_moves = self.statistics.total_moves;
                self.emit(&mut events, GameEvent::RunCompleted { total_moves });
            }
        } else {
            let heat = heat(to, &self.hazards);
            self.visited.insert(to, CellReading::Heat(heat));
            debug!("Moved {} -> {}, heat {}", from, to, heat);
            self.emit(&mut events, GameEvent::HeatRevealed { position: to, heat });
        }

        events
    }

    fn emit(&mut self, events: &mut Vec<GameEvent>, event: GameEvent) {
        self.statistics.update_from_event(&event);
        events.push(event);
    }
}

impl<R> GameState<R> {
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Readings for every cell visited in this attempt.
    pub fn visited(&self) -> &VisitedMap {
        &self.visited
    }

    pub fn reading_at(&self, position: Position) -> Option<CellReading> {
        self.visited.get(&position).copied()
    }

    /// True only for a visited cell that turned out to be lava.
    pub fn is_revealed_lava(&self, position: Position) -> bool {
        self.visited.contains_key(&position) && self.hazards.contains(position)
    }

    /// The full lava field, available only once the attempt is over.
    pub fn revealed_hazards(&self) -> Option<&HazardSet> {
        match self.status {
            GameStatus::Playing => None,
            GameStatus::Won | GameStatus::Lost => Some(&self.hazards),
        }
    }

    /// Number of lava cells on the current board.
    pub fn hazard_count(&self) -> usize {
        self.hazards.len()
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn level(&self) -> &LevelDefinition {
        &self.level
    }

    pub fn grid_size(&self) -> u32 {
        self.level.size
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    pub fn catalog_len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_final_level(&self) -> bool {
        self.catalog.is_final(self.level_index)
    }

    /// Whether [`GameState::advance_level`] would succeed.
    pub fn can_advance(&self) -> bool {
        self.status == GameStatus::Won && !self.is_final_level()
    }

    /// Whether the final level has been won.
    pub fn is_run_complete(&self) -> bool {
        self.status == GameStatus::Won && self.is_final_level()
    }

    pub fn level_moves(&self) -> u32 {
        self.statistics.level_moves
    }

    pub fn total_moves(&self) -> u64 {
        self.statistics.total_moves
    }

    pub fn statistics(&self) -> &RunStatistics {
        &self.statistics
    }

    /// Whether this run skipped ahead with [`GameState::start_practice`].
    pub fn is_practice(&self) -> bool {
        self.practice
    }

    /// Progress to send to the leaderboard, if the current state warrants a report.
    ///
    /// Reports follow a win, or a loss on the final level. Practice runs never report.
    pub fn pending_report(&self) -> Option<RunProgress> {
        if self.practice {
            return None;
        }
        match self.status {
            GameStatus::Won => Some(self.statistics.progress()),
            GameStatus::Lost if self.is_final_level() => Some(self.statistics.progress()),
            _ => None,
        }
    }
}

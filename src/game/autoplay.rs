//! # Autoplay Module
//!
//! An automated player that plays from the same information a human has:
//! the readings of visited cells and the level's published lava range.

use crate::{CellReading, Direction, GameState, GameStatus, LevelDefinition, Position};
use log::trace;
use pathfinding::prelude::dijkstra;
use std::collections::{HashMap, HashSet};

/// Scales the estimated lava probability of an unknown cell into path cost.
const RISK_WEIGHT: f64 = 400.0;

/// What can be inferred about the board from visited cells.
#[derive(Debug, Clone)]
pub struct BoardKnowledge {
    size: u32,
    readings: HashMap<Position, u8>,
    safe: HashSet<Position>,
    lava: HashSet<Position>,
    prior: f64,
}

impl BoardKnowledge {
    /// Builds knowledge from visited readings and deduces as much as possible.
    ///
    /// `prior` is the lava probability assumed for cells nothing is known about.
    pub fn new<I>(level: &LevelDefinition, readings: I, prior: f64) -> Self
    where
        I: IntoIterator<Item = (Position, CellReading)>,
    {
        let mut knowledge = Self {
            size: level.size,
            readings: HashMap::new(),
            safe: HashSet::new(),
            lava: HashSet::new(),
            prior,
        };

        knowledge.safe.insert(level.start());
        knowledge.safe.insert(level.target());
        for (position, reading) in readings {
            match reading {
                CellReading::Heat(heat) => {
                    knowledge.readings.insert(position, heat);
                    knowledge.safe.insert(position);
                }
                CellReading::Lava => {
                    knowledge.lava.insert(position);
                }
            }
        }

        knowledge.deduce();
        knowledge
    }

    /// Knowledge available to the player of `game` right now.
    pub fn from_game<R>(game: &GameState<R>) -> Self {
        let level = game.level();
        let expected = (level.min_hazards + level.max_hazards) as f64 / 2.0;
        let prior = (expected / level.eligible_cells() as f64).clamp(0.0, 1.0);
        Self::new(
            level,
            game.visited().iter().map(|(position, reading)| (*position, *reading)),
            prior,
        )
    }

    pub fn is_safe(&self, position: Position) -> bool {
        self.safe.contains(&position)
    }

    pub fn is_lava(&self, position: Position) -> bool {
        self.lava.contains(&position)
    }

    fn neighbors(&self, position: Position) -> impl Iterator<Item = Position> + '_ {
        position
            .adjacent_positions()
            .into_iter()
            .filter(move |neighbor| neighbor.in_bounds(self.size))
    }

    fn unknown_neighbors(&self, position: Position) -> Vec<Position> {
        self.neighbors(position)
            .filter(|neighbor| !self.safe.contains(neighbor) && !self.lava.contains(neighbor))
            .collect()
    }

    fn flagged_neighbors(&self, position: Position) -> usize {
        self.neighbors(position)
            .filter(|neighbor| self.lava.contains(neighbor))
            .count()
    }

    /// Applies the two counting rules until nothing changes.
    fn deduce(&mut self) {
        let mut changed = true;
        while changed {
            changed = false;
            let readings: Vec<(Position, u8)> =
                self.readings.iter().map(|(p, h)| (*p, *h)).collect();

            for (position, heat) in readings {
                let unknown = self.unknown_neighbors(position);
                if unknown.is_empty() {
                    continue;
                }
                let flagged = self.flagged_neighbors(position);
                let remaining = (heat as usize).saturating_sub(flagged);

                if remaining == 0 {
                    self.safe.extend(unknown);
                    changed = true;
                } else if remaining == unknown.len() {
                    self.lava.extend(unknown);
                    changed = true;
                }
            }
        }
    }

    /// Estimated chance that an unvisited cell holds lava.
    pub fn risk(&self, position: Position) -> f64 {
        if self.safe.contains(&position) {
            return 0.0;
        }
        if self.lava.contains(&position) {
            return 1.0;
        }

        let local = self
            .neighbors(position)
            .filter_map(|neighbor| self.readings.get(&neighbor).map(|heat| (neighbor, *heat)))
            .map(|(neighbor, heat)| {
                let remaining = (heat as usize).saturating_sub(self.flagged_neighbors(neighbor));
                let unknown = self.unknown_neighbors(neighbor).len().max(1);
                remaining as f64 / unknown as f64
            })
            .fold(None, |acc: Option<f64>, p| Some(acc.map_or(p, |a| a.max(p))));

        local.unwrap_or(self.prior)
    }

    fn step_cost(&self, position: Position) -> u32 {
        1 + (self.risk(position) * RISK_WEIGHT).round() as u32
    }
}

/// Chooses moves toward the target, preferring cells known to be safe.
#[derive(Debug, Clone, Copy, Default)]
pub struct Autoplayer;

impl Autoplayer {
    pub fn new() -> Self {
        Self
    }

    /// The next direction to move, or `None` if the level is over or the
    /// target is cut off by known lava.
    pub fn next_direction<R>(&self, game: &GameState<R>) -> Option<Direction> {
        if game.status() != GameStatus::Playing {
            return None;
        }
        let knowledge = BoardKnowledge::from_game(game);
        let path = self.plan(&knowledge, game.position(), game.level().target())?;
        let next = *path.get(1)?;
        let direction = Direction::from_delta(next - game.position())?;
        trace!("Autoplay steps {} toward {}", direction, game.level().target());
        Some(direction)
    }

    /// Cheapest 4-connected path from `from` to `to` that avoids known lava.
    pub fn plan(
        &self,
        knowledge: &BoardKnowledge,
        from: Position,
        to: Position,
    ) -> Option<Vec<Position>> {
        let (path, _cost) = dijkstra(
            &from,
            |position| {
                position
                    .cardinal_adjacent_positions()
                    .into_iter()
                    .filter(|next| next.in_bounds(knowledge.size) && !knowledge.is_lava(*next))
                    .map(|next| (next, knowledge.step_cost(next)))
                    .collect::<Vec<_>>()
            },
            |position| *position == to,
        )?;
        Some(path)
    }
}

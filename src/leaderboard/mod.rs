//! # Leaderboard Module
//!
//! The interface to the external score service and an in-memory reference implementation.
//!
//! Gameplay never depends on the leaderboard: the game hands finished
//! progress to a [`LeaderboardClient`], which talks to a [`LeaderboardService`]
//! on a background task and reports back whenever it gets around to it.

pub mod client;

pub use client::*;

use crate::config::{LEADERBOARD_SIZE, MAX_PLAYER_NAME_LEN};
use crate::{HeatseekerError, HeatseekerResult, RunProgress};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use uuid::Uuid;

/// Identifies one run on the leaderboard.
pub type SessionId = Uuid;

/// Progress submitted after a win, or after a loss on the final level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressReport {
    pub session_id: SessionId,
    pub level_reached: usize,
    pub total_moves: u64,
    pub player_name: Option<String>,
    pub is_human: Option<bool>,
}

impl ProgressReport {
    /// Builds a report from a run's progress figures.
    pub fn new(session_id: SessionId, progress: RunProgress) -> Self {
        Self {
            session_id,
            level_reached: progress.level_reached,
            total_moves: progress.total_moves,
            player_name: None,
            is_human: None,
        }
    }

    pub fn with_player_name(mut self, name: impl Into<String>) -> Self {
        self.player_name = Some(name.into());
        self
    }

    pub fn with_is_human(mut self, is_human: bool) -> Self {
        self.is_human = Some(is_human);
        self
    }
}

/// One row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub session_id: SessionId,
    pub player_name: String,
    pub is_human: bool,
    pub level_reached: usize,
    pub total_moves: u64,
    /// Order in which the current figures were recorded; earlier wins ties
    pub recorded_at: u64,
}

impl LeaderboardEntry {
    /// Leaderboard order: level descending, then moves ascending, then earliest first.
    pub fn ranking(&self, other: &Self) -> Ordering {
        other
            .level_reached
            .cmp(&self.level_reached)
            .then(self.total_moves.cmp(&other.total_moves))
            .then(self.recorded_at.cmp(&other.recorded_at))
    }

    pub fn is_named(&self) -> bool {
        !self.player_name.is_empty()
    }
}

/// The service's answer to a progress report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressReceipt {
    /// 1-based position among named entries
    pub rank: usize,
    pub entry: LeaderboardEntry,
    /// The entry would appear on the board but has no name yet
    pub should_prompt_name: bool,
}

/// Operations offered by a leaderboard backend.
pub trait LeaderboardService: Send {
    /// Registers a new run and returns its id.
    fn start_session(&mut self) -> HeatseekerResult<SessionId>;

    /// Records or updates the progress of a run.
    fn record_progress(&mut self, report: ProgressReport) -> HeatseekerResult<ProgressReceipt>;

    /// Returns the top named entries in leaderboard order.
    fn fetch_leaderboard(&self) -> HeatseekerResult<Vec<LeaderboardEntry>>;
}

/// Trims a display name and caps its length. Empty names become `None`.
pub fn normalize_player_name(name: &str) -> Option<String> {
    let trimmed: String = name.trim().chars().take(MAX_PLAYER_NAME_LEN).collect();
    let trimmed = trimmed.trim_end().to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// A leaderboard kept in process memory.
///
/// # Examples
///
/// ```
/// use heatseeker::{InMemoryLeaderboard, LeaderboardService, ProgressReport, RunProgress};
///
/// let mut board = InMemoryLeaderboard::new();
/// let session = board.start_session().unwrap();
/// let progress = RunProgress { level_reached: 3, total_moves: 120 };
/// let receipt = board
///     .record_progress(ProgressReport::new(session, progress).with_player_name("Ada"))
///     .unwrap();
/// assert_eq!(receipt.rank, 1);
/// assert_eq!(board.fetch_leaderboard().unwrap().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryLeaderboard {
    entries: HashMap<SessionId, Option<LeaderboardEntry>>,
    next_sequence: u64,
    limit: usize,
}

impl InMemoryLeaderboard {
    pub fn new() -> Self {
        Self::with_limit(LEADERBOARD_SIZE)
    }

    /// A leaderboard that returns at most `limit` entries.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: HashMap::new(),
            next_sequence: 0,
            limit: limit.max(1),
        }
    }

    fn sequence(&mut self) -> u64 {
        self.next_sequence += 1;
        self.next_sequence
    }

    fn named_entries(&self) -> impl Iterator<Item = &LeaderboardEntry> {
        self.entries
            .values()
            .flatten()
            .filter(|entry| entry.is_named())
    }
}

impl Default for InMemoryLeaderboard {
    fn default() -> Self {
        Self::new()
    }
}

impl LeaderboardService for InMemoryLeaderboard {
    fn start_session(&mut self) -> HeatseekerResult<SessionId> {
        let session_id = Uuid::new_v4();
        self.entries.insert(session_id, None);
        Ok(session_id)
    }

    fn record_progress(&mut self, report: ProgressReport) -> HeatseekerResult<ProgressReceipt> {
        let existing = self
            .entries
            .get(&report.session_id)
            .ok_or_else(|| {
                HeatseekerError::Leaderboard(format!("unknown session {}", report.session_id))
            })?
            .clone();

        let name = report.player_name.as_deref().and_then(normalize_player_name);
        let entry = match existing {
            Some(mut entry) => {
                let improved = report.level_reached > entry.level_reached
                    || (report.level_reached == entry.level_reached
                        && report.total_moves < entry.total_moves);
                if improved {
                    entry.level_reached = report.level_reached;
                    entry.total_moves = report.total_moves;
                    entry.recorded_at = self.sequence();
                }
                if let Some(name) = name {
                    entry.player_name = name;
                }
                if let Some(is_human) = report.is_human {
                    entry.is_human = is_human;
                }
                entry
            }
            None => LeaderboardEntry {
                session_id: report.session_id,
                player_name: name.unwrap_or_default(),
                is_human: report.is_human.unwrap_or(true),
                level_reached: report.level_reached,
                total_moves: report.total_moves,
                recorded_at: self.sequence(),
            },
        };

        let rank = 1 + self
            .named_entries()
            .filter(|other| other.session_id != entry.session_id)
            .filter(|other| other.ranking(&entry) == Ordering::Less)
            .count();
        let should_prompt_name = !entry.is_named() && rank <= self.limit;

        self.entries.insert(entry.session_id, Some(entry.clone()));

        Ok(ProgressReceipt {
            rank,
            entry,
            should_prompt_name,
        })
    }

    fn fetch_leaderboard(&self) -> HeatseekerResult<Vec<LeaderboardEntry>> {
        let mut entries: Vec<LeaderboardEntry> = self.named_entries().cloned().collect();
        entries.sort_by(LeaderboardEntry::ranking);
        entries.truncate(self.limit);
        Ok(entries)
    }
}

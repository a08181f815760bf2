//! # Heatseeker
//!
//! A single-player grid navigation puzzle. The player walks from the bottom-left
//! corner of an N×N board to the top-right corner while avoiding invisible lava,
//! guided only by the heat of every visited cell: the number of lava cells among
//! its eight neighbours.
//!
//! ## Architecture Overview
//!
//! - **Generation**: the fixed level catalog and the randomized lava field generator
//! - **Game State**: heat calculation, clamped movement, and the per-run state machine
//! - **Leaderboard**: the external score service interface and an async client for it
//! - **Session**: a thin text front end that drives the state machine from player input
//!
//! The core is synchronous and deterministic once a random source is supplied.
//! The only asynchronous boundary is the leaderboard client, which is strictly
//! best effort and never blocks gameplay.

pub mod config;
pub mod game;
pub mod generation;
pub mod input;
pub mod leaderboard;
pub mod rendering;
pub mod session;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use leaderboard::*;
pub use rendering::*;

pub use config::{AutoplayConfig, GameConfig};
pub use session::{GameSession, SceneType};

/// Core error type for the Heatseeker engine.
#[derive(thiserror::Error, Debug)]
pub enum HeatseekerError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Level catalog or configuration is unusable
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Action cannot be performed
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// Leaderboard collaborator failed
    #[error("Leaderboard error: {0}")]
    Leaderboard(String),
}

/// Result type used throughout the Heatseeker codebase.
pub type HeatseekerResult<T> = Result<T, HeatseekerError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! # Rendering Module
//!
//! Plain-text presentation of the board for terminal play.

pub mod display;

pub use display::*;

//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of the game core. It maps `crossterm`
//! key events into [`crate::types::GameAction`] and exposes the two reads the
//! driver needs: a non-blocking poll during play and a blocking read for the
//! splash screen and the play-again prompt.

pub mod map;
pub mod source;

pub use term_tetris_types as types;

pub use map::map_key;
pub use source::{CrosstermKeys, KeySource, ScriptedKeys};

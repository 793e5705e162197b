//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the game rules, state management, and simulation logic.
//! It has **zero dependencies** on terminals or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Time is passed in as elapsed milliseconds
//! - **Allocation-free**: Grid, bitmaps and snapshots are fixed-size arrays
//!
//! # Module Structure
//!
//! - [`pieces`]: The seven piece bitmaps and the active piece
//! - [`board`]: 10x20 grid, collision checks and row clearing
//! - [`rotation`]: Clockwise rotation with horizontal kicks
//! - [`scoring`]: Row points, levels and gravity interval
//! - [`rng`]: Uniform piece/color rolls
//! - [`game_state`]: The session state machine
//! - [`snapshot`]: Read-only frame projection for renderers
//!
//! # Example
//!
//! ```
//! use term_tetris_core::{ActionOutcome, GameState};
//! use term_tetris_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! assert_eq!(game.apply_action(GameAction::SoftDrop), ActionOutcome::Applied);
//!
//! // Advance one second of gravity.
//! game.tick(1000);
//!
//! if game.is_dirty() {
//!     let frame = game.take_snapshot();
//!     assert!(frame.changed);
//! }
//! assert_eq!(game.score(), 0);
//! ```
//!
//! # Timing
//!
//! The driver calls [`GameState::tick`](game_state::GameState::tick) with the time
//! elapsed since the previous call. Gravity moves the piece one row whenever the
//! accumulated time reaches the current fall interval (1000ms at level 1).

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod rotation;
pub mod scoring;
pub mod snapshot;

pub use term_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedRows};
pub use game_state::{ActionOutcome, GameState, LockEvent};
pub use pieces::{get_shape, NextPiece, Shape, Tetromino, CATALOG};
pub use rng::SimpleRng;
pub use rotation::{rotate, try_rotate};
pub use scoring::{Progress, RowAward};
pub use snapshot::{ActiveSnapshot, GameSnapshot};

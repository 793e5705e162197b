//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: the game view draws a snapshot into
//! a framebuffer, and the renderer flushes that framebuffer to the terminal as
//! full or diffed redraws.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Bound the bytes written per frame
//! - Allow precise control over aspect ratio (e.g. 2 chars wide per cell)

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use term_tetris_core as core;
pub use term_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{palette_rgb, GameView, GAME_OVER_LINES, INTRO_PROMPT, PANEL_WIDTH};
pub use renderer::{
    encode_diff_into, encode_full_into, for_each_changed_run, TerminalRenderer, FRAME_CAPACITY,
};

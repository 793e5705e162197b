//! Terminal Tetris (workspace facade crate).
//!
//! The game rules, input mapping and rendering live in dedicated crates under
//! `crates/`; this package re-exports them as `term_tetris::{core,input,term,types}`
//! and adds the pieces that tie them together: environment [`config`] and the
//! [`runner`] that drives a session.

pub mod config;
pub mod runner;

pub use term_tetris_core as core;
pub use term_tetris_input as input;
pub use term_tetris_term as term;
pub use term_tetris_types as types;

pub use config::GameConfig;
pub use runner::{Flow, FrameSink, Runner, TerminalScreen};

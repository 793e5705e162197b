//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core simulation, terminal rendering, input mapping).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn position**: `x = BOARD_WIDTH / 2 - size / 2`, `y = 0`
//!
//! # Timing and Progression
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_FALL_INTERVAL_MS` | 1000 | Gravity interval at level 1 |
//! | `FALL_INTERVAL_STEP_MS` | 25 | Interval reduction per level-up |
//! | `FALL_INTERVAL_FLOOR_MS` | 250 | Gravity never gets faster than this |
//! | `POINTS_PER_ROW` | 10 | One point per cleared cell |
//! | `LEVEL_SCORE_STEP` | 100 | Level `n` ends once score reaches `n * 100` |
//!
//! # Examples
//!
//! ```
//! use term_tetris_types::{Color, GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::T;
//! assert_eq!(piece.index(), 6);
//! assert_eq!(PieceKind::from_index(piece.index()), Some(PieceKind::T));
//! assert_eq!(PieceKind::from_index(7), None);
//!
//! assert_eq!(Color::new(3).map(Color::get), Some(3));
//! assert_eq!(Color::new(0), None);
//!
//! assert_eq!(GameAction::Rotate.as_str(), "rotate");
//! assert!(GameAction::ConfirmYes.is_confirm());
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Side length of the square every piece bitmap is stored in.
pub const MAX_SHAPE_SIDE: usize = 4;

/// Number of catalog pieces.
pub const PIECE_COUNT: usize = 7;

/// Number of palette entries a piece or locked cell can carry.
pub const PALETTE_SIZE: u8 = 7;

/// Level a fresh session starts at.
pub const INITIAL_LEVEL: u32 = 1;

/// Gravity interval of a fresh session (1000ms = 1 second per row)
pub const INITIAL_FALL_INTERVAL_MS: u32 = 1000;

/// Gravity speed-up applied on every level-up.
pub const FALL_INTERVAL_STEP_MS: u32 = 25;

/// Fastest gravity interval reachable by leveling.
pub const FALL_INTERVAL_FLOOR_MS: u32 = 250;

/// Points awarded per cleared row (one per cell).
pub const POINTS_PER_ROW: u32 = BOARD_WIDTH as u32;

/// Score span of one level.
pub const LEVEL_SCORE_STEP: u32 = 100;


/// The seven tetromino piece kinds, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    J,
    L,
    S,
    Z,
    T,
}

impl PieceKind {
    /// Every kind, indexed by [`PieceKind::index`].
    pub const ALL: [PieceKind; PIECE_COUNT] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::J,
        PieceKind::L,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
    ];

    /// Position of this kind in the piece catalog.
    pub fn index(self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::T => 6,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Palette index of a piece or locked cell (1..=7).
///
/// Color is rolled independently of the piece kind, so it is its own type rather
/// than being derived from [`PieceKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(u8);

impl Color {
    pub const RED: Color = Color(1);
    pub const GREEN: Color = Color(2);
    pub const YELLOW: Color = Color(3);
    pub const BLUE: Color = Color(4);
    pub const MAGENTA: Color = Color(5);
    pub const CYAN: Color = Color(6);
    pub const WHITE: Color = Color(7);

    pub const ALL: [Color; PALETTE_SIZE as usize] = [
        Color::RED,
        Color::GREEN,
        Color::YELLOW,
        Color::BLUE,
        Color::MAGENTA,
        Color::CYAN,
        Color::WHITE,
    ];

    /// Returns `None` for 0 (empty) and anything past the palette.
    pub const fn new(index: u8) -> Option<Self> {
        if index >= 1 && index <= PALETTE_SIZE {
            Some(Color(index))
        } else {
            None
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Color)`: Locked block of that color
pub type Cell = Option<Color>;

/// Logical inputs understood by the game session.
///
/// Raw key codes are mapped onto these by the input crate; the session never sees
/// terminal events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one row immediately, locking it if blocked
    SoftDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Leave the game immediately
    Quit,
    /// Answer "yes" at the play-again prompt
    ConfirmYes,
    /// Answer "no" at the play-again prompt
    ConfirmNo,
}

impl GameAction {
    /// Convert to camelCase string (used in log fields)
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::Rotate => "rotate",
            GameAction::Quit => "quit",
            GameAction::ConfirmYes => "confirmYes",
            GameAction::ConfirmNo => "confirmNo",
        }
    }

    /// Whether this is an answer to the play-again prompt.
    pub fn is_confirm(&self) -> bool {
        matches!(self, GameAction::ConfirmYes | GameAction::ConfirmNo)
    }
}

/// Session lifecycle states.
///
/// `Spawning` and `Locking` are transient: they are resolved at the start of the
/// next simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Spawning,
    Falling,
    Locking,
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Spawning => "spawning",
            Phase::Falling => "falling",
            Phase::Locking => "locking",
            Phase::GameOver => "gameOver",
        }
    }
}

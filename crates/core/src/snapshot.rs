//! Read-only frame projection of a [`GameState`](crate::GameState).
//!
//! Everything here is `Copy`: a snapshot is a complete, detached value, so a
//! renderer can never observe a half-applied move.

use crate::pieces::{NextPiece, Shape, Tetromino};
use crate::types::{Color, PieceKind, Phase, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: Color,
    pub x: i8,
    pub y: i8,
}

impl ActiveSnapshot {
    /// Absolute board cells covered by the piece.
    pub fn board_cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            color: value.color,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Locked cells as palette indices, 0 = empty.
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub next: NextPiece,
    pub phase: Phase,
    pub running: bool,
    pub episode_id: u32,
    pub score: u32,
    pub level: u32,
    pub fall_interval_ms: u32,
    /// Whether the session changed since the previous pull.
    pub changed: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.next = NextPiece::default();
        self.phase = Phase::Spawning;
        self.running = true;
        self.episode_id = 0;
        self.score = 0;
        self.level = 0;
        self.fall_interval_ms = 0;
        self.changed = false;
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Color shown at `(x, y)`: the active piece wins over the locked grid.
    pub fn color_at(&self, x: i8, y: i8) -> Option<Color> {
        if let Some(active) = &self.active {
            if active.board_cells().any(|c| c == (x, y)) {
                return Some(active.color);
            }
        }
        if x < 0 || y < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Color::new(self.board[y as usize][x as usize])
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            next: NextPiece::default(),
            phase: Phase::Spawning,
            running: true,
            episode_id: 0,
            score: 0,
            level: 0,
            fall_interval_ms: 0,
            changed: false,
        };
        s.clear();
        s
    }
}

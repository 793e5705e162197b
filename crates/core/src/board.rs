//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or holds a palette color.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)

use arrayvec::ArrayVec;

use crate::pieces::{Shape, Tetromino};
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Row indices at which clears happened, in the order they were processed.
///
/// A cascading clear re-examines the same index, so an index can repeat.
pub type ClearedRows = ArrayVec<u8, { BOARD_HEIGHT as usize }>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
    /// Whether the most recent lock left the piece on its spawn row.
    locked_at_spawn_row: bool,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
            locked_at_spawn_row: false,
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Does `shape` placed with its top-left corner at `(x, y)` hit a wall, the
    /// floor, or a locked cell?
    ///
    /// There is no ceiling: cells above row 0 count as free.
    pub fn collides(&self, shape: &Shape, x: i8, y: i8) -> bool {
        shape.cells().any(|(dx, dy)| {
            let px = x + dx;
            let py = y + dy;
            px < 0
                || px >= BOARD_WIDTH as i8
                || py >= BOARD_HEIGHT as i8
                || self.is_occupied(px, py)
        })
    }

    /// [`Board::collides`] for a whole piece at its current origin.
    pub fn piece_collides(&self, piece: &Tetromino) -> bool {
        self.collides(&piece.shape, piece.x, piece.y)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    /// Check if a row has no locked cells
    pub fn is_row_empty(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| cell.is_none()))
            .unwrap_or(true)
    }

    fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= BOARD_HEIGHT as usize {
            return None;
        }
        let start = y * BOARD_WIDTH as usize;
        Some(&self.cells[start..start + BOARD_WIDTH as usize])
    }

    /// Clear a row and shift all rows above down
    /// Returns the number of lines cleared (1 or 0)
    pub fn clear_row(&mut self, y: usize) -> usize {
        if y >= BOARD_HEIGHT as usize {
            return 0;
        }

        let width = BOARD_WIDTH as usize;

        // copy_within handles the overlapping move of rows 0..y onto 1..=y
        self.cells.copy_within(0..y * width, width);
        self.cells[..width].fill(None);

        1
    }

    /// Clear every full row, scanning from the bottom up.
    ///
    /// After a clear the same index is examined again, since it now holds the row
    /// that was above it. The scan stops at the first completely empty row: locked
    /// cells only ever sit on top of other cells, so nothing above a gap can be full.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let mut y = BOARD_HEIGHT as usize;

        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                self.clear_row(row);
                // Each clear removes one non-empty row, so this never exceeds BOARD_HEIGHT.
                cleared.push(row as u8);
            } else if self.is_row_empty(row) {
                break;
            } else {
                y -= 1;
            }
        }

        cleared
    }

    /// Write a piece's color into every cell it covers.
    ///
    /// The caller is expected to have checked [`Board::piece_collides`]; overlapping
    /// cells are overwritten and cells outside the grid are dropped.
    pub fn lock(&mut self, piece: &Tetromino) {
        for (x, y) in piece.board_cells() {
            self.set(x, y, Some(piece.color));
        }
        self.locked_at_spawn_row = piece.y == 0;
    }

    /// Check if the last locked piece never left its spawn row (game over condition)
    pub fn is_spawn_blocked(&self) -> bool {
        self.locked_at_spawn_row
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy the grid out as palette indices (0 = empty).
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        let width = BOARD_WIDTH as usize;
        for (y, row) in out.iter_mut().enumerate() {
            for (x, v) in row.iter_mut().enumerate() {
                *v = self.cells[y * width + x].map(|c| c.get()).unwrap_or(0);
            }
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
        self.locked_at_spawn_row = false;
    }

    /// Fill an entire row with one color.
    pub fn fill_row(&mut self, y: i8, cell: Cell) {
        for x in 0..BOARD_WIDTH as i8 {
            self.set(x, y, cell);
        }
    }

    /// Create from a 2D vector for testing (converts to flat array)
    #[cfg(test)]
    pub fn from_cells(cells_2d: Vec<Vec<Cell>>) -> Self {
        assert_eq!(cells_2d.len(), BOARD_HEIGHT as usize);
        assert!(cells_2d.iter().all(|row| row.len() == BOARD_WIDTH as usize));

        let mut board = Self::new();
        for (y, row) in cells_2d.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                board.cells[y * BOARD_WIDTH as usize + x] = *cell;
            }
        }
        board
    }

    /// Convert to 2D vector for testing/display
    #[cfg(test)]
    pub fn to_cells(&self) -> Vec<Vec<Cell>> {
        let width = BOARD_WIDTH as usize;
        (0..BOARD_HEIGHT as usize)
            .map(|y| self.cells[y * width..(y + 1) * width].to_vec())
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

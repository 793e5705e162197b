//! Pieces module - tetromino bitmaps and the active piece
//!
//! Every piece is a square bitmap of side 2, 3 or 4 stored in a fixed 4x4 array.
//! Only the top-left `size x size` corner is meaningful; rotation happens inside
//! that corner so the bitmap never drifts.

use crate::types::{Color, PieceKind, BOARD_WIDTH, MAX_SHAPE_SIDE, PIECE_COUNT};

/// Offset of a single mino relative to piece origin, as `(dx, dy)`.
pub type MinoOffset = (i8, i8);

/// Raw occupancy grid, indexed `[row][col]`.
type Bits = [[bool; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];

/// Square piece bitmap with an explicit side length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    bits: Bits,
    size: u8,
}

impl Shape {
    /// Build a shape from 0/1 rows. Cells outside `size` are ignored.
    pub const fn from_rows(rows: [[u8; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE], size: u8) -> Self {
        let mut bits = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        let mut row = 0;
        while row < size as usize {
            let mut col = 0;
            while col < size as usize {
                bits[row][col] = rows[row][col] != 0;
                col += 1;
            }
            row += 1;
        }
        Self { bits, size }
    }

    /// Side length of the bounding square.
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Whether `(row, col)` is occupied. Out-of-range cells are empty.
    pub fn is_set(&self, row: usize, col: usize) -> bool {
        row < self.size as usize && col < self.size as usize && self.bits[row][col]
    }

    /// Occupied cells as `(dx, dy)` offsets from the piece origin, row-major.
    pub fn cells(&self) -> impl Iterator<Item = MinoOffset> + '_ {
        let n = self.size as usize;
        (0..n).flat_map(move |row| {
            (0..n)
                .filter(move |&col| self.bits[row][col])
                .map(move |col| (col as i8, row as i8))
        })
    }

    /// Rotate 90° clockwise: transpose, then mirror every row.
    pub fn rotated_cw(&self) -> Self {
        let n = self.size as usize;
        let mut bits = self.bits;

        for i in 0..n {
            for j in 0..i {
                let tmp = bits[i][j];
                bits[i][j] = bits[j][i];
                bits[j][i] = tmp;
            }
        }
        for row in bits.iter_mut().take(n) {
            row[..n].reverse();
        }

        Self {
            bits,
            size: self.size,
        }
    }
}

/// The piece catalog, indexed by [`PieceKind::index`].
pub const CATALOG: [Shape; PIECE_COUNT] = [
    // I
    Shape::from_rows([[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]], 4),
    // O
    Shape::from_rows([[1, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]], 2),
    // J
    Shape::from_rows([[1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]], 3),
    // L
    Shape::from_rows([[0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]], 3),
    // S
    Shape::from_rows([[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]], 3),
    // Z
    Shape::from_rows([[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]], 3),
    // T
    Shape::from_rows([[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]], 3),
];

/// Get a copy of the catalog shape for a piece kind
pub fn get_shape(kind: PieceKind) -> Shape {
    CATALOG[kind.index()]
}

/// A pre-rolled piece waiting to spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NextPiece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Default for NextPiece {
    fn default() -> Self {
        Self {
            kind: PieceKind::I,
            color: Color::RED,
        }
    }
}

/// Active falling piece
///
/// `x`/`y` is the top-left corner of the bounding square in board coordinates.
/// The shape is an owned copy, so rotating it never touches [`CATALOG`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: Color,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a catalog piece centered horizontally on the top row.
    pub fn spawn(kind: PieceKind, color: Color) -> Self {
        let shape = get_shape(kind);
        Self {
            kind,
            shape,
            color,
            x: spawn_x(&shape),
            y: 0,
        }
    }

    pub fn from_next(next: NextPiece) -> Self {
        Self::spawn(next.kind, next.color)
    }

    /// Same piece shifted by `(dx, dy)`.
    pub fn moved(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Absolute board cells covered by this piece.
    pub fn board_cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}

/// Spawn column for a shape: `BOARD_WIDTH / 2 - size / 2`.
pub fn spawn_x(shape: &Shape) -> i8 {
    (BOARD_WIDTH / 2) as i8 - (shape.size() / 2) as i8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_sizes() {
        let sizes: Vec<u8> = PieceKind::ALL.iter().map(|k| get_shape(*k).size()).collect();
        assert_eq!(sizes, vec![4, 2, 3, 3, 3, 3, 3]);
    }

    #[test]
    fn test_every_piece_has_four_minos() {
        for kind in PieceKind::ALL {
            assert_eq!(get_shape(kind).cells().count(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn test_from_rows_ignores_cells_outside_size() {
        let shape = Shape::from_rows([[1, 1, 1, 1], [1, 1, 1, 1], [1, 1, 1, 1], [1, 1, 1, 1]], 2);
        assert_eq!(shape.cells().count(), 4);
        assert!(!shape.is_set(0, 2));
        assert!(!shape.is_set(3, 3));
    }

    #[test]
    fn test_rotate_t_clockwise() {
        let t = get_shape(PieceKind::T).rotated_cw();
        // .#.      .#.
        // ###  ->  .##
        // ...      .#.
        let cells: Vec<MinoOffset> = t.cells().collect();
        assert_eq!(cells, vec![(1, 0), (1, 1), (2, 1), (1, 2)]);
    }

    #[test]
    fn test_rotate_i_becomes_vertical_in_column_two() {
        let i = get_shape(PieceKind::I).rotated_cw();
        let cells: Vec<MinoOffset> = i.cells().collect();
        assert_eq!(cells, vec![(2, 0), (2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn test_rotation_does_not_touch_catalog() {
        let before = CATALOG;
        let mut piece = Tetromino::spawn(PieceKind::L, Color::BLUE);
        piece.shape = piece.shape.rotated_cw();
        assert_ne!(piece.shape, CATALOG[PieceKind::L.index()]);
        assert_eq!(before, CATALOG);
    }

    #[test]
    fn test_spawn_is_centered() {
        assert_eq!(Tetromino::spawn(PieceKind::I, Color::RED).x, 3);
        assert_eq!(Tetromino::spawn(PieceKind::O, Color::RED).x, 4);
        assert_eq!(Tetromino::spawn(PieceKind::T, Color::RED).x, 4);
        assert_eq!(Tetromino::spawn(PieceKind::T, Color::RED).y, 0);
    }

    #[test]
    fn test_board_cells_offsets_by_origin() {
        let piece = Tetromino::spawn(PieceKind::O, Color::CYAN).moved(0, 5);
        let cells: Vec<(i8, i8)> = piece.board_cells().collect();
        assert_eq!(cells, vec![(4, 5), (5, 5), (4, 6), (5, 6)]);
    }
}

//! Rotation with bounded horizontal kicks.
//!
//! A rotated candidate that collides in place is shifted sideways by 1, then 2, ...
//! up to `size / 2` columns, trying right before left at each distance. There are no
//! vertical kicks.

use crate::board::Board;
use crate::pieces::Tetromino;

/// Horizontal offsets tried for a shape of side `size`, in order: `0, +1, -1, +2, -2, ...`
pub fn kick_offsets(size: u8) -> impl Iterator<Item = i8> {
    let reach = (size / 2) as i8;
    std::iter::once(0).chain((1..=reach).flat_map(|k| [k, -k]))
}

/// Try to rotate a piece 90° clockwise.
/// Returns the rotated (and possibly kicked) piece, or `None` if every kick collides.
pub fn try_rotate(piece: &Tetromino, board: &Board) -> Option<Tetromino> {
    let shape = piece.shape.rotated_cw();

    kick_offsets(shape.size())
        .map(|dx| piece.x + dx)
        .find(|&x| !board.collides(&shape, x, piece.y))
        .map(|x| Tetromino {
            shape,
            x,
            ..*piece
        })
}

/// Rotate if possible, otherwise hand back the piece untouched.
pub fn rotate(piece: &Tetromino, board: &Board) -> Tetromino {
    try_rotate(piece, board).unwrap_or(*piece)
}

//! Board tests: cell access, row clearing and the spawn-row lock flag.

use term_tetris::core::{Board, Tetromino};
use term_tetris::types::{Color, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

fn fill_row_except(board: &mut Board, y: i8, gap: i8) {
    for x in 0..BOARD_WIDTH as i8 {
        if x != gap {
            board.set(x, y, Some(Color::BLUE));
        }
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert!(!board.is_occupied(x, y), "Cell ({}, {}) should be empty", x, y);
            assert_eq!(board.get(x, y), Some(None));
        }
    }
    assert!(!board.is_spawn_blocked());
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new();

    assert!(board.set(5, 10, Some(Color::MAGENTA)));
    assert_eq!(board.get(5, 10), Some(Some(Color::MAGENTA)));
    assert!(board.is_occupied(5, 10));

    assert!(board.set(5, 10, None));
    assert_eq!(board.get(5, 10), Some(None));

    assert!(!board.set(-1, 0, Some(Color::RED)));
    assert!(!board.set(0, BOARD_HEIGHT as i8, Some(Color::RED)));
}

#[test]
fn test_clear_single_row_shifts_everything_above() {
    let mut board = Board::new();
    board.fill_row(19, Some(Color::RED));
    board.set(3, 18, Some(Color::GREEN));
    board.set(7, 12, Some(Color::YELLOW));

    let cleared = board.clear_full_rows();

    assert_eq!(cleared.as_slice(), &[19]);
    assert_eq!(board.get(3, 19), Some(Some(Color::GREEN)));
    assert_eq!(board.get(7, 13), Some(Some(Color::YELLOW)));
    assert!(board.is_row_empty(0));
    assert!(!board.is_row_full(19));
}

#[test]
fn test_clear_k_adjacent_rows() {
    for k in 1..=4i8 {
        let mut board = Board::new();
        for y in (BOARD_HEIGHT as i8 - k)..BOARD_HEIGHT as i8 {
            board.fill_row(y, Some(Color::CYAN));
        }
        // One partial row above the stack survives.
        board.set(0, BOARD_HEIGHT as i8 - k - 1, Some(Color::WHITE));

        let cleared = board.clear_full_rows();
        assert_eq!(cleared.len(), k as usize, "k = {}", k);
        assert_eq!(board.get(0, BOARD_HEIGHT as i8 - 1), Some(Some(Color::WHITE)));
        for y in 0..BOARD_HEIGHT as usize - 1 {
            assert!(board.is_row_empty(y), "row {} should be empty for k = {}", y, k);
        }
    }
}

#[test]
fn test_clear_stops_at_first_empty_row() {
    let mut board = Board::new();
    fill_row_except(&mut board, 19, 0);
    // Row 18 empty, row 17 full: the scan never reaches row 17.
    board.fill_row(17, Some(Color::RED));

    let cleared = board.clear_full_rows();

    assert!(cleared.is_empty());
    assert!(board.is_row_full(17));
}

#[test]
fn test_clear_split_rows() {
    let mut board = Board::new();
    board.fill_row(19, Some(Color::RED));
    fill_row_except(&mut board, 18, 4);
    board.fill_row(17, Some(Color::RED));

    let cleared = board.clear_full_rows();

    // Row 19 clears, the partial row drops into 19, then old row 17 (now 18) clears.
    assert_eq!(cleared.len(), 2);
    assert_eq!(board.get(4, 19), Some(None));
    assert_eq!(board.get(0, 19), Some(Some(Color::BLUE)));
    assert!(board.is_row_empty(18));
}

#[test]
fn test_lock_writes_color_and_tracks_spawn_row() {
    let mut board = Board::new();
    let mut piece = Tetromino::spawn(PieceKind::T, Color::MAGENTA);
    piece.y = 5;

    board.lock(&piece);
    for (x, y) in piece.board_cells() {
        assert_eq!(board.get(x, y), Some(Some(Color::MAGENTA)));
    }
    assert!(!board.is_spawn_blocked());

    let top = Tetromino::spawn(PieceKind::O, Color::RED);
    board.lock(&top);
    assert!(board.is_spawn_blocked());

    board.clear();
    assert!(!board.is_spawn_blocked());
    assert!(board.cells().iter().all(|c| c.is_none()));
}

#[test]
fn test_write_u8_grid_uses_palette_indices() {
    let mut board = Board::new();
    board.set(0, 0, Some(Color::RED));
    board.set(9, 19, Some(Color::WHITE));

    let mut grid = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
    board.write_u8_grid(&mut grid);

    assert_eq!(grid[0][0], 1);
    assert_eq!(grid[19][9], 7);
    assert_eq!(grid[10][5], 0);
}

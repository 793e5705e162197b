//! Session-level scenarios: gravity, locking, scoring, levels, game over and restart.

use term_tetris::core::{ActionOutcome, GameState, Progress, Tetromino};
use term_tetris::types::{
    Color, GameAction, Phase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, FALL_INTERVAL_FLOOR_MS,
    INITIAL_FALL_INTERVAL_MS, INITIAL_LEVEL,
};

/// A fresh session with `piece` as the active piece and the dirty flag cleared.
fn state_with(piece: Tetromino) -> GameState {
    let mut state = GameState::new(4242);
    state.set_active(piece);
    state.mark_clean();
    state
}

fn piece_at(kind: PieceKind, x: i8, y: i8) -> Tetromino {
    let mut piece = Tetromino::spawn(kind, Color::CYAN);
    piece.x = x;
    piece.y = y;
    piece
}

/// Vertical I occupying column `x + 2`, rows `y..y + 4`.
fn vertical_i(x: i8, y: i8) -> Tetromino {
    let mut piece = piece_at(PieceKind::I, x, y);
    piece.shape = piece.shape.rotated_cw();
    piece
}

fn fill_row_except(state: &mut GameState, y: i8, gap: i8) {
    for x in 0..BOARD_WIDTH as i8 {
        if x != gap {
            state.board_mut().set(x, y, Some(Color::GREEN));
        }
    }
}

#[test]
fn test_new_game_starts_falling_with_defaults() {
    let state = GameState::new(1);
    assert_eq!(state.phase(), Phase::Falling);
    assert!(state.running());
    assert_eq!(state.score(), 0);
    assert_eq!(state.level(), INITIAL_LEVEL);
    assert_eq!(state.fall_interval_ms(), INITIAL_FALL_INTERVAL_MS);
    let active = state.active().expect("first piece spawned");
    assert_eq!(active.y, 0);
    assert!(state.is_dirty());
}

#[test]
fn test_o_piece_falls_one_row_after_one_interval() {
    let mut state = state_with(piece_at(PieceKind::O, 4, 0));

    assert!(!state.tick(999));
    assert!(!state.is_dirty());
    assert_eq!(state.active().unwrap().y, 0);

    assert!(state.tick(1));
    let active = state.active().unwrap();
    assert_eq!((active.x, active.y), (4, 1));
    assert!(state.is_dirty());
    assert_eq!(state.score(), 0);
    assert_eq!(state.level(), 1);
}

#[test]
fn test_timer_resets_even_when_gravity_is_blocked() {
    let mut state = state_with(piece_at(PieceKind::O, 4, BOARD_HEIGHT as i8 - 2));

    state.tick(1000);
    assert_eq!(state.phase(), Phase::Locking);
    assert_eq!(state.drop_timer_ms(), 0);

    // The lock resolves on the next tick and the next piece spawns.
    state.tick(0);
    assert_eq!(state.phase(), Phase::Falling);
    assert!(state.board().is_occupied(4, 19));
    assert_eq!(state.active().unwrap().y, 0);
}

#[test]
fn test_soft_drop_moves_one_row_independent_of_timer() {
    let mut state = state_with(piece_at(PieceKind::T, 4, 3));
    assert_eq!(state.apply_action(GameAction::SoftDrop), ActionOutcome::Applied);
    assert_eq!(state.active().unwrap().y, 4);
    assert_eq!(state.drop_timer_ms(), 0);
}

#[test]
fn test_blocked_move_changes_nothing() {
    let mut state = state_with(piece_at(PieceKind::O, 0, 5));
    let before = state.snapshot();

    assert_eq!(state.apply_action(GameAction::MoveLeft), ActionOutcome::Rejected);
    assert!(!state.is_dirty());
    assert_eq!(state.snapshot(), before);

    assert_eq!(state.apply_action(GameAction::MoveRight), ActionOutcome::Applied);
    assert_eq!(state.active().unwrap().x, 1);
    assert!(state.is_dirty());
}

#[test]
fn test_filling_row_19_clears_it_and_shifts_down() {
    let mut state = state_with(vertical_i(7, 16));
    fill_row_except(&mut state, 19, 9);
    state.board_mut().set(2, 10, Some(Color::YELLOW));

    state.lock_piece();

    assert_eq!(state.score(), 10);
    assert_eq!(state.phase(), Phase::Spawning);
    let board = state.board();
    // The rest of the I dropped by one row.
    for y in 17..=19 {
        assert!(board.is_occupied(9, y), "column 9 row {}", y);
    }
    assert!(!board.is_occupied(9, 16));
    assert!(!board.is_occupied(0, 19));
    assert!(board.is_occupied(2, 11));
    assert!(!board.is_occupied(2, 10));
    assert!(board.is_row_empty(0));

    let event = state.take_last_event().expect("lock event");
    assert_eq!(event.rows_cleared, 1);
    assert_eq!(event.points, 10);
    assert!(!event.game_over);
    assert!(state.take_last_event().is_none());
}

#[test]
fn test_k_rows_score_ten_each() {
    for k in 1..=4i8 {
        let mut state = state_with(vertical_i(7, 16));
        for y in (BOARD_HEIGHT as i8 - k)..BOARD_HEIGHT as i8 {
            fill_row_except(&mut state, y, 9);
        }

        state.lock_piece();

        assert_eq!(state.score(), 10 * k as u32, "k = {}", k);
        assert_eq!(state.level(), 1);
        // Whatever is left of the I sits at the bottom of column 9.
        for y in 0..BOARD_HEIGHT as i8 {
            let expect = y >= BOARD_HEIGHT as i8 - (4 - k);
            assert_eq!(state.board().is_occupied(9, y), expect, "k = {} row {}", k, y);
        }
    }
}

#[test]
fn test_level_rises_exactly_at_threshold() {
    let mut progress = Progress::new();
    for _ in 0..9 {
        assert!(!progress.award_row());
    }
    assert_eq!((progress.score(), progress.level()), (90, 1));

    assert!(progress.award_row());
    assert_eq!(progress.score(), 100);
    assert_eq!(progress.level(), 2);
    assert_eq!(progress.fall_interval_ms(), 975);

    for _ in 0..9 {
        assert!(!progress.award_row());
    }
    assert!(progress.award_row());
    assert_eq!(progress.level(), 3);
    assert_eq!(progress.fall_interval_ms(), 950);
}

#[test]
fn test_ten_single_row_clears_reach_level_two() {
    let mut state = state_with(vertical_i(7, 16));

    for clear in 1..=10u32 {
        state.board_mut().clear();
        state.set_active(vertical_i(7, 16));
        fill_row_except(&mut state, 19, 9);

        state.lock_piece();

        let event = state.take_last_event().expect("lock event");
        assert_eq!(event.rows_cleared, 1, "clear {}", clear);
        assert_eq!(event.levels_gained, u32::from(clear == 10), "clear {}", clear);
        assert_eq!(state.score(), 10 * clear);

        state.tick(0);
        assert_eq!(state.phase(), Phase::Falling);
    }

    assert_eq!(state.score(), 100);
    assert_eq!(state.level(), 2);
    assert_eq!(state.fall_interval_ms(), 975);
}

#[test]
fn test_fall_interval_never_drops_below_floor() {
    let mut progress = Progress::new();
    let mut last = progress.fall_interval_ms();
    for _ in 0..1000 {
        progress.award_row();
        let now = progress.fall_interval_ms();
        assert!(now <= last);
        assert!(now >= FALL_INTERVAL_FLOOR_MS);
        last = now;
    }
    assert_eq!(last, FALL_INTERVAL_FLOOR_MS);
}

#[test]
fn test_lock_on_spawn_row_is_game_over_even_if_it_completes_a_row() {
    let mut state = state_with(piece_at(PieceKind::O, 4, 0));
    fill_row_except(&mut state, 1, 4);
    state.board_mut().set(4, 1, None);
    state.board_mut().set(5, 1, None);

    state.lock_piece();

    assert_eq!(state.phase(), Phase::GameOver);
    assert!(state.game_over());
    assert!(!state.running());
    assert_eq!(state.score(), 0);
    assert!(state.take_last_event().unwrap().game_over);
}

#[test]
fn test_game_over_ignores_play_input() {
    let mut state = state_with(piece_at(PieceKind::O, 4, 0));
    state.lock_piece();
    assert!(state.game_over());

    for action in [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::Rotate,
        GameAction::SoftDrop,
        GameAction::Quit,
    ] {
        assert_eq!(state.apply_action(action), ActionOutcome::Rejected);
    }
    assert!(!state.tick(5000));
    assert!(state.game_over());
}

#[test]
fn test_answering_no_at_game_over_exits() {
    let mut state = state_with(piece_at(PieceKind::O, 4, 0));
    state.lock_piece();
    assert_eq!(state.apply_action(GameAction::ConfirmNo), ActionOutcome::Exit);
}

#[test]
fn test_restart_after_game_over_resets_everything() {
    let mut state = state_with(vertical_i(7, 16));
    fill_row_except(&mut state, 19, 9);
    state.lock_piece();
    assert_eq!(state.score(), 10);
    state.tick(0);

    let top = piece_at(PieceKind::O, 4, 0);
    state.set_active(top);
    state.lock_piece();
    assert!(state.game_over());

    assert_eq!(state.apply_action(GameAction::ConfirmYes), ActionOutcome::Applied);

    assert_eq!(state.phase(), Phase::Falling);
    assert_eq!(state.score(), 0);
    assert_eq!(state.level(), 1);
    assert_eq!(state.fall_interval_ms(), 1000);
    assert_eq!(state.episode_id(), 1);
    assert!(state.board().cells().iter().all(|c| c.is_none()));
    assert!(state.active().is_some());
}

#[test]
fn test_quit_while_playing_exits() {
    let mut state = GameState::new(3);
    assert_eq!(state.apply_action(GameAction::Quit), ActionOutcome::Exit);
}

#[test]
fn test_vertical_i_on_right_wall_kicks_left_one() {
    let mut state = state_with(vertical_i(7, 5));

    assert_eq!(state.apply_action(GameAction::Rotate), ActionOutcome::Applied);

    let active = state.active().unwrap();
    assert_eq!(active.x, 6);
    let cells: Vec<(i8, i8)> = active.board_cells().collect();
    assert_eq!(cells, vec![(6, 7), (7, 7), (8, 7), (9, 7)]);
}

#[test]
fn test_i_against_right_wall_kicks_left_two() {
    // Three turns put the I in column 1 of its box; x = 8 hugs the wall.
    let mut piece = vertical_i(8, 5);
    piece.shape = piece.shape.rotated_cw().rotated_cw();
    let mut state = state_with(piece);

    assert_eq!(state.apply_action(GameAction::Rotate), ActionOutcome::Applied);

    let active = state.active().unwrap();
    assert_eq!(active.x, 6);
    let cells: Vec<(i8, i8)> = active.board_cells().collect();
    assert_eq!(cells, vec![(6, 6), (7, 6), (8, 6), (9, 6)]);
}

#[test]
fn test_horizontal_i_at_width_minus_four_rotates_in_place() {
    let mut state = state_with(piece_at(PieceKind::I, BOARD_WIDTH as i8 - 4, 5));

    assert_eq!(state.apply_action(GameAction::Rotate), ActionOutcome::Applied);

    let active = state.active().unwrap();
    assert_eq!(active.x, BOARD_WIDTH as i8 - 4);
    assert!(active.board_cells().all(|(x, _)| x == 8));
}

#[test]
fn test_same_seed_same_game() {
    let mut a = GameState::new(77);
    let mut b = GameState::new(77);
    let script = [
        GameAction::MoveLeft,
        GameAction::Rotate,
        GameAction::SoftDrop,
        GameAction::MoveRight,
    ];
    for step in 0..400 {
        let action = script[step % script.len()];
        a.apply_action(action);
        b.apply_action(action);
        a.tick(250);
        b.tick(250);
        if a.game_over() {
            break;
        }
    }
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_take_snapshot_clears_dirty() {
    let mut state = GameState::new(5);
    assert!(state.is_dirty());
    let snap = state.take_snapshot();
    assert!(snap.changed);
    assert!(!state.is_dirty());
    assert!(!state.snapshot().changed);
}

//! Game state module - the session state machine
//!
//! Ties together board, pieces, RNG and scoring. A session moves through
//! `Spawning -> Falling -> Locking -> (Spawning | GameOver)`. Input is only honored
//! while `Falling`; `Spawning` and `Locking` are resolved at the start of the next
//! [`GameState::tick`], before gravity runs.

use tracing::debug;

use crate::board::Board;
use crate::pieces::{NextPiece, Tetromino};
use crate::rng::SimpleRng;
use crate::rotation::try_rotate;
use crate::scoring::Progress;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, Phase};

/// What applying an action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// State changed.
    Applied,
    /// Blocked move, or an input the current phase does not accept. Nothing changed.
    Rejected,
    /// The player asked to leave.
    Exit,
}

/// Emitted once per lock, consumed by observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub rows_cleared: u32,
    pub points: u32,
    pub levels_gained: u32,
    pub game_over: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<Tetromino>,
    next: NextPiece,
    rng: SimpleRng,
    progress: Progress,
    phase: Phase,
    /// Time since the last gravity step.
    drop_timer_ms: u32,
    dirty: bool,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    last_event: Option<LockEvent>,
}

impl GameState {
    /// Create a new game with the given RNG seed and spawn the first piece.
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let next = rng.roll_piece();

        let mut state = Self {
            board: Board::new(),
            active: None,
            next,
            rng,
            progress: Progress::new(),
            phase: Phase::Spawning,
            drop_timer_ms: 0,
            dirty: true,
            episode_id: 0,
            last_event: None,
        };
        state.spawn_piece();
        state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// False once the session has reached game over.
    pub fn running(&self) -> bool {
        self.phase != Phase::GameOver
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.progress.score()
    }

    pub fn level(&self) -> u32 {
        self.progress.level()
    }

    pub fn fall_interval_ms(&self) -> u32 {
        self.progress.fall_interval_ms()
    }

    pub fn drop_timer_ms(&self) -> u32 {
        self.drop_timer_ms
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn next_piece(&self) -> NextPiece {
        self.next
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for scripted setups.
    #[doc(hidden)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Replace the falling piece, for scripted setups.
    #[doc(hidden)]
    pub fn set_active(&mut self, piece: Tetromino) {
        self.active = Some(piece);
        self.set_phase(Phase::Falling);
    }

    /// Whether anything renderable changed since the last [`GameState::take_snapshot`].
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);

        out.active = self.active.map(ActiveSnapshot::from);
        out.next = self.next;
        out.phase = self.phase;
        out.running = self.running();
        out.episode_id = self.episode_id;
        out.score = self.progress.score();
        out.level = self.progress.level();
        out.fall_interval_ms = self.progress.fall_interval_ms();
        out.changed = self.dirty;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Pull a frame and clear the dirty flag.
    pub fn take_snapshot(&mut self) -> GameSnapshot {
        let s = self.snapshot();
        self.dirty = false;
        s
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
        self.dirty = true;
    }

    /// Materialize the pre-rolled piece on the top row and roll a new one.
    fn spawn_piece(&mut self) {
        let piece = Tetromino::from_next(self.next);
        self.active = Some(piece);
        self.next = self.rng.roll_piece();
        self.set_phase(Phase::Falling);
    }

    /// Try to move the active piece
    pub(crate) fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let moved = active.moved(dx, dy);
        if self.board.piece_collides(&moved) {
            return false;
        }

        self.active = Some(moved);
        self.dirty = true;
        true
    }

    /// Try to rotate the active piece clockwise with horizontal kicks
    pub(crate) fn try_rotate(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        match try_rotate(&active, &self.board) {
            Some(rotated) => {
                self.active = Some(rotated);
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Move down one row, or start locking if something is below.
    fn step_down(&mut self) {
        if !self.try_move(0, 1) {
            self.set_phase(Phase::Locking);
        }
    }

    /// Lock the active piece onto the board and handle line clears
    pub fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        self.board.lock(&active);

        if self.board.is_spawn_blocked() {
            debug!(
                score = self.progress.score(),
                level = self.progress.level(),
                episode = self.episode_id,
                "piece locked on spawn row, game over"
            );
            self.last_event = Some(LockEvent {
                rows_cleared: 0,
                points: 0,
                levels_gained: 0,
                game_over: true,
            });
            self.set_phase(Phase::GameOver);
            return;
        }

        let cleared = self.board.clear_full_rows();
        let award = self.progress.award_rows(cleared.len());

        if !cleared.is_empty() {
            debug!(
                rows = cleared.len(),
                points = award.points,
                score = self.progress.score(),
                "rows cleared"
            );
        }
        if award.levels_gained > 0 {
            debug!(
                level = self.progress.level(),
                fall_interval_ms = self.progress.fall_interval_ms(),
                "level up"
            );
        }

        self.last_event = Some(LockEvent {
            rows_cleared: cleared.len() as u32,
            points: award.points,
            levels_gained: award.levels_gained,
            game_over: false,
        });
        self.set_phase(Phase::Spawning);
    }

    /// Resolve pending transient phases. Returns true if anything happened.
    fn settle(&mut self) -> bool {
        let mut changed = false;
        if self.phase == Phase::Locking {
            self.lock_piece();
            changed = true;
        }
        if self.phase == Phase::Spawning {
            self.spawn_piece();
            changed = true;
        }
        changed
    }

    /// Main game tick - resolve pending lock/spawn, then apply gravity.
    ///
    /// `elapsed_ms` is the time since the previous tick. Returns true if the state
    /// changed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let mut changed = self.settle();

        if self.phase != Phase::Falling {
            return changed;
        }

        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        if self.drop_timer_ms >= self.progress.fall_interval_ms() {
            self.drop_timer_ms = 0;
            self.step_down();
            changed = true;
        }

        changed
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> ActionOutcome {
        let applied = |ok: bool| {
            if ok {
                ActionOutcome::Applied
            } else {
                ActionOutcome::Rejected
            }
        };

        match (self.phase, action) {
            (Phase::GameOver, GameAction::ConfirmYes) => {
                self.restart();
                ActionOutcome::Applied
            }
            (Phase::GameOver, GameAction::ConfirmNo) => ActionOutcome::Exit,
            (Phase::GameOver, _) => ActionOutcome::Rejected,
            (_, GameAction::Quit) => ActionOutcome::Exit,
            (Phase::Falling, GameAction::MoveLeft) => applied(self.try_move(-1, 0)),
            (Phase::Falling, GameAction::MoveRight) => applied(self.try_move(1, 0)),
            (Phase::Falling, GameAction::Rotate) => applied(self.try_rotate()),
            (Phase::Falling, GameAction::SoftDrop) => {
                // Independent of the gravity timer; blocked means lock.
                self.step_down();
                ActionOutcome::Applied
            }
            _ => ActionOutcome::Rejected,
        }
    }

    /// Start over with an empty board, continuing the RNG sequence.
    pub fn restart(&mut self) {
        let seed = self.rng.state();
        let next_episode = self.episode_id.wrapping_add(1);
        *self = Self::new(seed);
        self.episode_id = next_episode;
        debug!(episode = next_episode, "session restarted");
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

//! The driver loop: keys in, ticks, frames out.
//!
//! [`Runner`] is generic over where keys come from and where frames go, so the
//! same loop runs against the real terminal and against scripted keys in tests.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::{debug, info};

use crate::core::{ActionOutcome, GameSnapshot, GameState};
use crate::input::{map_key, KeySource};
use crate::term::{FrameBuffer, GameView, TerminalRenderer};
use crate::types::GameAction;

/// Pause between input polls while playing.
pub const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Whether the loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Destination for rendered frames.
pub trait FrameSink {
    fn present(&mut self, snap: &GameSnapshot) -> Result<()>;
    fn present_intro(&mut self) -> Result<()>;
}

/// [`GameView`] drawing into a [`TerminalRenderer`].
pub struct TerminalScreen {
    view: GameView,
    renderer: TerminalRenderer,
    fb: FrameBuffer,
}

impl TerminalScreen {
    pub fn new(view: GameView) -> Self {
        let (w, h) = view.frame_size();
        Self {
            view,
            renderer: TerminalRenderer::new(),
            fb: FrameBuffer::new(w, h),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        self.renderer.enter()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.renderer.exit()
    }
}

impl Default for TerminalScreen {
    fn default() -> Self {
        Self::new(GameView::default())
    }
}

impl FrameSink for TerminalScreen {
    fn present(&mut self, snap: &GameSnapshot) -> Result<()> {
        self.view.render_into(snap, &mut self.fb);
        self.renderer.draw_swap(&mut self.fb)
    }

    fn present_intro(&mut self) -> Result<()> {
        self.view.render_intro_into(&mut self.fb);
        self.renderer.draw_swap(&mut self.fb)
    }
}

/// Owns one session plus its key source and frame sink.
pub struct Runner<K: KeySource, S: FrameSink> {
    game: GameState,
    keys: K,
    sink: S,
    frame: GameSnapshot,
}

impl<K: KeySource, S: FrameSink> Runner<K, S> {
    pub fn new(game: GameState, keys: K, sink: S) -> Self {
        Self {
            game,
            keys,
            sink,
            frame: GameSnapshot::default(),
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut GameState {
        &mut self.game
    }

    pub fn keys(&self) -> &K {
        &self.keys
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The most recently presented frame.
    pub fn last_frame(&self) -> &GameSnapshot {
        &self.frame
    }

    pub fn into_parts(self) -> (GameState, K, S) {
        (self.game, self.keys, self.sink)
    }

    /// Show the splash screen and wait for any key.
    pub fn intro(&mut self) -> Result<()> {
        self.sink.present_intro()?;
        self.keys.read_key()?;
        Ok(())
    }

    /// One iteration: input, simulation, then a redraw if anything changed.
    pub fn step(&mut self, elapsed_ms: u32) -> Result<Flow> {
        if self.game.game_over() {
            if self.await_confirm()? == Flow::Exit {
                return Ok(Flow::Exit);
            }
        } else if let Some(key) = self.keys.poll_key()? {
            if let Some(action) = map_key(key) {
                let outcome = self.game.apply_action(action);
                debug!(
                    action = action.as_str(),
                    phase = self.game.phase().as_str(),
                    ?outcome,
                    "input"
                );
                if outcome == ActionOutcome::Exit {
                    info!(score = self.game.score(), "player quit");
                    return Ok(Flow::Exit);
                }
            }
        }

        self.game.tick(elapsed_ms);

        if let Some(event) = self.game.take_last_event() {
            if event.game_over {
                info!(
                    score = self.game.score(),
                    level = self.game.level(),
                    episode = self.game.episode_id(),
                    "game over"
                );
            } else if event.rows_cleared > 0 {
                debug!(rows = event.rows_cleared, points = event.points, "lock");
            }
        }

        if self.game.is_dirty() {
            self.present()?;
        }
        Ok(Flow::Continue)
    }

    /// Intro (unless skipped), then step until the player leaves.
    pub fn run(&mut self, skip_intro: bool) -> Result<()> {
        if !skip_intro {
            self.intro()?;
        }
        self.present()?;
        info!(episode = self.game.episode_id(), "session started");

        let mut last = Instant::now();
        loop {
            let now = Instant::now();
            let elapsed_ms = now.duration_since(last).as_millis().min(u32::MAX as u128) as u32;
            last = now;

            let was_waiting = self.game.game_over();
            if self.step(elapsed_ms)? == Flow::Exit {
                info!("session ended");
                return Ok(());
            }
            if was_waiting {
                // Time spent at the prompt does not count toward gravity.
                last = Instant::now();
            }

            thread::sleep(POLL_INTERVAL);
        }
    }

    /// Present the game-over frame and block until the player answers.
    fn await_confirm(&mut self) -> Result<Flow> {
        self.present()?;
        loop {
            let key = self.keys.read_key()?;
            let Some(action) = map_key(key).filter(GameAction::is_confirm) else {
                continue;
            };
            if self.game.apply_action(action) == ActionOutcome::Exit {
                info!("declined another game");
                return Ok(Flow::Exit);
            }
            info!(episode = self.game.episode_id(), "new game");
            return Ok(Flow::Continue);
        }
    }

    fn present(&mut self) -> Result<()> {
        self.frame = self.game.take_snapshot();
        self.sink.present(&self.frame)
    }
}

//! Terminal Tetris (default binary).
//!
//! Reads configuration from the environment, takes over the terminal and runs
//! one session until the player quits. The terminal is restored on every exit
//! path before any error is reported.

use std::fs::File;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use term_tetris::config::DEFAULT_LOG_FILTER;
use term_tetris::core::GameState;
use term_tetris::input::CrosstermKeys;
use term_tetris::{GameConfig, Runner, TerminalScreen};

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    init_logging(&config)?;

    let now_nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(1);
    let seed = config.seed_or(now_nanos);
    info!(seed, skip_intro = config.skip_intro, "starting");

    let mut screen = TerminalScreen::default();
    if let Err(err) = screen.enter() {
        let _ = screen.exit();
        error!(?err, "failed to set up terminal");
        return Err(err);
    }

    let mut runner = Runner::new(GameState::new(seed), CrosstermKeys::new(), screen);
    let result = runner.run(config.skip_intro);

    // Always try to restore terminal state.
    let (_, _, mut screen) = runner.into_parts();
    let _ = screen.exit();

    if let Err(err) = &result {
        error!(?err, "game loop failed");
    }
    result
}

/// Install a file logger when `TETRIS_LOG_PATH` is set; stdout belongs to the game.
fn init_logging(config: &GameConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };

    let file = File::create(path).with_context(|| format!("create log file {}", path.display()))?;
    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow!("install log subscriber: {e}"))
}

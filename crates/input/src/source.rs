//! Key sources: where the driver gets key presses from.

use std::collections::VecDeque;
use std::time::Duration;

use anyhow::{anyhow, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

/// The two reads the game loop needs.
pub trait KeySource {
    /// Return a pending key press without waiting, or `None`.
    fn poll_key(&mut self) -> Result<Option<KeyEvent>>;

    /// Wait for the next key press.
    fn read_key(&mut self) -> Result<KeyEvent>;
}

/// Reads key presses from the real terminal via crossterm.
///
/// Release and repeat events are dropped so each physical press maps to one action,
/// as do non-key events such as resizes.
#[derive(Debug, Default)]
pub struct CrosstermKeys;

impl CrosstermKeys {
    pub fn new() -> Self {
        Self
    }
}

impl KeySource for CrosstermKeys {
    fn poll_key(&mut self) -> Result<Option<KeyEvent>> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(Some(key));
                }
            }
        }
        Ok(None)
    }

    fn read_key(&mut self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(key);
                }
            }
        }
    }
}

/// Pre-recorded key presses, for headless runs and tests.
///
/// `poll_key` drains the script and then reports nothing; `read_key` on an empty
/// script is an error since nothing could ever arrive.
#[derive(Debug, Clone, Default)]
pub struct ScriptedKeys {
    keys: VecDeque<KeyEvent>,
}

impl ScriptedKeys {
    pub fn new(keys: impl IntoIterator<Item = KeyEvent>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    /// Script built from plain key codes.
    pub fn from_codes(codes: impl IntoIterator<Item = KeyCode>) -> Self {
        Self::new(codes.into_iter().map(KeyEvent::from))
    }

    pub fn push(&mut self, key: KeyEvent) {
        self.keys.push_back(key);
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl KeySource for ScriptedKeys {
    fn poll_key(&mut self) -> Result<Option<KeyEvent>> {
        Ok(self.keys.pop_front())
    }

    fn read_key(&mut self) -> Result<KeyEvent> {
        self.keys
            .pop_front()
            .ok_or_else(|| anyhow!("scripted key source exhausted while waiting for a key"))
    }
}

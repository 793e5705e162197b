//! Scoring module - row points, levels and gravity speed
//!
//! Each cleared row is worth one point per cell. Level `n` lasts until the score
//! reaches `n * 100`; every level-up shortens the fall interval by 25ms, down to a
//! 250ms floor.

use crate::types::{
    FALL_INTERVAL_FLOOR_MS, FALL_INTERVAL_STEP_MS, INITIAL_FALL_INTERVAL_MS, INITIAL_LEVEL,
    LEVEL_SCORE_STEP, POINTS_PER_ROW,
};

/// Result of awarding a batch of cleared rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowAward {
    pub points: u32,
    pub levels_gained: u32,
}

/// Score, level and gravity interval of one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    score: u32,
    level: u32,
    fall_interval_ms: u32,
}

impl Progress {
    pub fn new() -> Self {
        Self {
            score: 0,
            level: INITIAL_LEVEL,
            fall_interval_ms: INITIAL_FALL_INTERVAL_MS,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn fall_interval_ms(&self) -> u32 {
        self.fall_interval_ms
    }

    /// Score at which the current level ends.
    pub fn level_threshold(&self) -> u32 {
        self.level.saturating_mul(LEVEL_SCORE_STEP)
    }

    /// Award one cleared row. Returns true if the level went up.
    pub fn award_row(&mut self) -> bool {
        self.score = self.score.saturating_add(POINTS_PER_ROW);
        if self.score >= self.level_threshold() {
            self.level += 1;
            self.fall_interval_ms = next_fall_interval_ms(self.fall_interval_ms);
            return true;
        }
        false
    }

    /// Award `rows` cleared rows one at a time, checking the level after each.
    pub fn award_rows(&mut self, rows: usize) -> RowAward {
        let before = self.score;
        let mut levels_gained = 0;
        for _ in 0..rows {
            if self.award_row() {
                levels_gained += 1;
            }
        }
        RowAward {
            points: self.score - before,
            levels_gained,
        }
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

/// Gravity interval after one level-up.
pub fn next_fall_interval_ms(current: u32) -> u32 {
    if current > FALL_INTERVAL_FLOOR_MS {
        current
            .saturating_sub(FALL_INTERVAL_STEP_MS)
            .max(FALL_INTERVAL_FLOOR_MS)
    } else {
        current
    }
}

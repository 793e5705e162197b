//! RNG module - uniform piece and color rolls
//!
//! Each roll picks a catalog piece and a palette color independently and uniformly.
//! A small LCG keeps sessions reproducible from a seed.

use crate::pieces::NextPiece;
use crate::types::{Color, PieceKind, PALETTE_SIZE, PIECE_COUNT};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Low LCG bits have short periods; take the range from the high half.
        (self.next_u32() >> 16) % max
    }

    /// Roll the next piece kind and, independently, its color.
    pub fn roll_piece(&mut self) -> NextPiece {
        let kind = PieceKind::ALL[self.next_range(PIECE_COUNT as u32) as usize];
        let color = Color::ALL[self.next_range(PALETTE_SIZE as u32) as usize];
        NextPiece { kind, color }
    }

    /// Get the current RNG state (for restarting with a continued sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

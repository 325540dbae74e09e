use serde::{Deserialize, Serialize};

use crate::types::Seed;

/// Mulberry32 — deterministic 32-bit PRNG.
/// Pure function: returns (value_in_0_1, next_state).
pub fn prng_next(state: u32) -> (f64, u32) {
    let mut t = state.wrapping_add(0x6d2b79f5);
    let next_state = t;
    t = (t ^ (t >> 15)).wrapping_mul(t | 1);
    t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
    let value = (t ^ (t >> 14)) as f64 / 4294967296.0;
    (value, next_state)
}

/// Seeded draw source owned by the match. Every hit roll goes through here,
/// so a seed plus a transcript fully determines a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prng {
    state: u32,
}

impl Prng {
    pub fn new(seed: Seed) -> Self {
        Prng { state: seed }
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    /// Uniform draw in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        let (value, next) = prng_next(self.state);
        self.state = next;
        value
    }
}

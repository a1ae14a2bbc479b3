//! Noise sources for the prediction core.
//!
//! The estimator never reaches for a global RNG; callers hand it a
//! `NoiseSource`. Production paths use the thread-local generator, tests
//! pin the draw to zero or a scripted sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the bounded integer noise added to predicted demand.
#[cfg_attr(test, mockall::automock)]
pub trait NoiseSource {
    /// Draw one value in `[-bound, bound]`.
    fn sample(&mut self, bound: u32) -> i64;
}

/// Uniform noise from the calling thread's RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadNoise;

impl NoiseSource for ThreadNoise {
    fn sample(&mut self, bound: u32) -> i64 {
        let b = i64::from(bound);
        rand::thread_rng().gen_range(-b..=b)
    }
}

/// Uniform noise from a seeded generator, reproducible across runs.
#[derive(Debug, Clone)]
pub struct SeededNoise {
    rng: StdRng,
}

impl SeededNoise {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl NoiseSource for SeededNoise {
    fn sample(&mut self, bound: u32) -> i64 {
        let b = i64::from(bound);
        self.rng.gen_range(-b..=b)
    }
}

/// Always zero.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoNoise;

impl NoiseSource for NoNoise {
    fn sample(&mut self, _bound: u32) -> i64 {
        0
    }
}

/// Replays a fixed sequence, cycling when exhausted. Values are clamped to
/// the requested bound so the estimator's contract still holds.
#[derive(Debug, Clone)]
pub struct ScriptedNoise {
    values: Vec<i64>,
    pos: usize,
}

impl ScriptedNoise {
    pub fn new(values: Vec<i64>) -> Self {
        Self { values, pos: 0 }
    }
}

impl NoiseSource for ScriptedNoise {
    fn sample(&mut self, bound: u32) -> i64 {
        if self.values.is_empty() {
            return 0;
        }
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        let b = i64::from(bound);
        v.clamp(-b, b)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

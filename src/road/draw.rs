/*!
 * Traffic Draws
 *
 * Source of the random integers a road worker needs: how many vehicles pass
 * during a green cycle and how long green is held. Injected per worker so
 * tests can script exact sequences.
 */

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;
use std::ops::RangeInclusive;

/// Source of bounded integers
pub trait TrafficDraw: Send {
    /// Draw a value in `range` (inclusive on both ends)
    ///
    /// An empty range yields its start.
    fn draw(&mut self, range: RangeInclusive<u64>) -> u64;
}

/// Uniform draws from an RNG
#[derive(Debug, Clone)]
pub struct RandomDraw<R = ChaCha8Rng> {
    rng: R,
}

impl RandomDraw<ChaCha8Rng> {
    /// Reproducible draws from a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Draws seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl<R: Rng> RandomDraw<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send> TrafficDraw for RandomDraw<R> {
    fn draw(&mut self, range: RangeInclusive<u64>) -> u64 {
        if range.is_empty() {
            return *range.start();
        }
        self.rng.gen_range(range)
    }
}

/// Replays a fixed sequence of values
///
/// Each value is clamped into the requested range. Once the script runs out
/// every draw returns the range start.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDraw {
    script: VecDeque<u64>,
}

impl ScriptedDraw {
    pub fn new(values: impl IntoIterator<Item = u64>) -> Self {
        Self {
            script: values.into_iter().collect(),
        }
    }

    /// Values not yet drawn
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl TrafficDraw for ScriptedDraw {
    fn draw(&mut self, range: RangeInclusive<u64>) -> u64 {
        let (lo, hi) = (*range.start(), *range.end());
        match self.script.pop_front() {
            Some(value) if lo <= hi => value.clamp(lo, hi),
            _ => lo,
        }
    }
}

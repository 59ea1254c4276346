//! Pluggable uniform random sources for galaxy generation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform floats in [0, 1)
pub trait RandomSource {
    fn next_uniform(&mut self) -> f32;
}

/// Adapter over any `rand` generator
pub struct RngSource<R>(pub R);

impl RngSource<StdRng> {
    /// Different cloud on every run
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }

    /// Reproducible cloud for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_uniform(&mut self) -> f32 {
        self.0.gen::<f32>()
    }
}

/// Replays a fixed sequence of values, cycling when exhausted
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f32>,
    cursor: usize,
}

#[cfg(test)]
impl ScriptedRandom {
    pub fn new(values: Vec<f32>) -> Self {
        assert!(!values.is_empty(), "scripted random source needs values");
        Self { values, cursor: 0 }
    }

    /// Always returns `value`
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRandom {
    fn next_uniform(&mut self) -> f32 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

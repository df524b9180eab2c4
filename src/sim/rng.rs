//! Randomness sources for obstacle generation
//!
//! Play uses an entropy-seeded PCG stream; tests and replays of a specific bug
//! can swap in a seeded or scripted source.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// A source of uniform floats in [0, 1)
pub trait UniformSource {
    fn next_uniform(&mut self) -> f32;
}

/// Unseeded PCG stream (the default for real runs)
#[derive(Debug, Clone)]
pub struct EntropySource {
    rng: Pcg32,
}

impl EntropySource {
    pub fn new() -> Self {
        Self {
            rng: Pcg32::from_rng(&mut rand::rng()),
        }
    }
}

impl Default for EntropySource {
    fn default() -> Self {
        Self::new()
    }
}

impl UniformSource for EntropySource {
    fn next_uniform(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

/// PCG stream from a fixed seed
#[derive(Debug, Clone)]
pub struct SeededSource {
    seed: u64,
    rng: Pcg32,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl UniformSource for SeededSource {
    fn next_uniform(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

/// Replays a fixed list of values, wrapping around at the end
///
/// Values are clamped into [0, 1). An empty script always yields 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    values: Vec<f32>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Always returns the same value
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }
}

impl UniformSource for ScriptedSource {
    fn next_uniform(&mut self) -> f32 {
        let Some(&value) = self.values.get(self.cursor) else {
            return 0.0;
        };
        self.cursor = (self.cursor + 1) % self.values.len();
        if value.is_finite() {
            value.clamp(0.0, 1.0 - f32::EPSILON)
        } else {
            0.0
        }
    }
}

impl<T: UniformSource + ?Sized> UniformSource for &mut T {
    fn next_uniform(&mut self) -> f32 {
        (**self).next_uniform()
    }
}

impl<T: UniformSource + ?Sized> UniformSource for Box<T> {
    fn next_uniform(&mut self) -> f32 {
        (**self).next_uniform()
    }
}

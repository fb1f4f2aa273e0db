//! Seeded white noise.

use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{Bounds, GeneratorFunction};

/// Fixed seed so every run produces the same texture
pub const DEFAULT_SEED: u64 = 42;

/// Uniform random values within the bounds.
///
/// Draws from `[0, 1]` and maps onto the bounds, so any valid range works.
///
/// Samples are drawn from one sequence in call order, so the coordinate is
/// ignored: the value at a texel depends on when it is visited, not where
/// it is.
pub struct WhiteNoise<const D: usize> {
    rng: StdRng,
    dist: Uniform<f32>,
    bounds: Bounds,
}

impl<const D: usize> WhiteNoise<D> {
    pub fn new(bounds: Bounds) -> Self {
        Self::with_seed(bounds, DEFAULT_SEED)
    }

    pub fn with_seed(bounds: Bounds, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            dist: Uniform::new_inclusive(0.0, 1.0),
            bounds,
        }
    }
}

impl<const D: usize> GeneratorFunction<D> for WhiteNoise<D> {
    fn sample(&mut self, _coord: &[f32; D]) -> f32 {
        self.bounds.lerp(self.dist.sample(&mut self.rng))
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }
}

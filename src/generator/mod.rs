//! Scalar noise sources sampled over normalised texture coordinates.
//!
//! Each source is a [`GeneratorFunction`] for one fixed dimension. Sources
//! that only make sense for some dimensions refuse construction for the
//! others instead of quietly producing zeros.

mod perlin;
mod simplex;
mod white;
mod wood;

pub use perlin::PerlinNoise;
pub use simplex::SimplexNoise;
pub use white::WhiteNoise;
pub use wood::WoodNoise;

use crate::error::{Error, Result};

/// A scalar field over `[0, 1]^D` (coordinates may stray past 1).
pub trait GeneratorFunction<const D: usize> {
    /// Produce one sample. The result always lies within [`Self::bounds`].
    fn sample(&mut self, coord: &[f32; D]) -> f32;

    /// The closed range samples are rescaled into.
    fn bounds(&self) -> Bounds;
}

/// Closed output range `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    lower: f32,
    upper: f32,
}

impl Bounds {
    pub fn new(lower: f32, upper: f32) -> Result<Self> {
        if !lower.is_finite() || !upper.is_finite() {
            return Err(Error::invalid(
                "bounds",
                format!("must be finite, got [{}, {}]", lower, upper),
            ));
        }
        if lower > upper {
            return Err(Error::invalid(
                "bounds",
                format!("lower {} exceeds upper {}", lower, upper),
            ));
        }
        if !(upper - lower).is_finite() {
            return Err(Error::invalid(
                "bounds",
                format!("range [{}, {}] is wider than f32 can hold", lower, upper),
            ));
        }
        Ok(Self { lower, upper })
    }

    pub fn lower(&self) -> f32 {
        self.lower
    }

    pub fn upper(&self) -> f32 {
        self.upper
    }

    pub fn contains(&self, value: f32) -> bool {
        (self.lower..=self.upper).contains(&value)
    }

    /// Map a coherent-noise value from `[-1, 1]` into these bounds.
    ///
    /// Fractal sums can overshoot the unit range slightly, so the raw value
    /// is clamped first.
    pub fn rescale(&self, raw: f64) -> f32 {
        self.lerp(0.5 * (1.0 + raw.clamp(-1.0, 1.0) as f32))
    }

    /// Map `t` in `[0, 1]` onto `[lower, upper]`.
    pub fn lerp(&self, t: f32) -> f32 {
        ((self.upper - self.lower) * t + self.lower).clamp(self.lower, self.upper)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            lower: 0.0,
            upper: 1.0,
        }
    }
}

/// Reject dimensions a 3D-backed source has no specialisation for.
pub(crate) fn require_2d_or_3d(kind: &'static str, dimension: usize) -> Result<()> {
    match dimension {
        2 | 3 => Ok(()),
        _ => Err(Error::UnsupportedDimension { kind, dimension }),
    }
}

/// Embed a 2D or 3D coordinate in 3D space (missing axes are zero).
pub(crate) fn lift<const D: usize>(coord: &[f32; D]) -> [f64; 3] {
    let mut point = [0.0; 3];
    for (dst, &src) in point.iter_mut().zip(coord.iter()) {
        *dst = src as f64;
    }
    point
}

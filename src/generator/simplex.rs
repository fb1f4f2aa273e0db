//! Octave simplex noise.

use noise::{NoiseFn, Simplex};

use super::{lift, require_2d_or_3d, Bounds, GeneratorFunction};
use crate::error::{Error, Result};
use crate::params::SimplexParams;

/// Sum of simplex octaves, normalised by the total amplitude.
///
/// Each octave doubles the frequency and scales the amplitude by the
/// persistence. A fractional octave count runs one extra (full) octave.
pub struct SimplexNoise<const D: usize> {
    source: Simplex,
    octaves: usize,
    persistence: f64,
    scale: f64,
    bounds: Bounds,
}

impl<const D: usize> SimplexNoise<D> {
    pub fn new(params: &SimplexParams, bounds: Bounds) -> Result<Self> {
        require_2d_or_3d("simplex", D)?;
        if !(params.octaves > 0.0) || !params.octaves.is_finite() {
            return Err(Error::invalid(
                "octaves",
                format!("must be positive, got {}", params.octaves),
            ));
        }
        if !params.persistence.is_finite() || !params.scale.is_finite() {
            return Err(Error::invalid("persistence/scale", "must be finite"));
        }

        Ok(Self {
            source: Simplex::new(0),
            octaves: params.octaves.ceil() as usize,
            persistence: params.persistence as f64,
            scale: params.scale as f64,
            bounds,
        })
    }

    fn octave_sum(&self, point: [f64; 3]) -> f64 {
        let mut total = 0.0;
        let mut frequency = self.scale;
        let mut amplitude = 1.0;
        let mut max_amplitude = 0.0;

        for _ in 0..self.octaves {
            let [x, y, z] = point;
            total += self.source.get([x * frequency, y * frequency, z * frequency]) * amplitude;
            frequency *= 2.0;
            max_amplitude += amplitude;
            amplitude *= self.persistence;
        }

        if max_amplitude == 0.0 {
            0.0
        } else {
            total / max_amplitude
        }
    }
}

impl<const D: usize> GeneratorFunction<D> for SimplexNoise<D> {
    fn sample(&mut self, coord: &[f32; D]) -> f32 {
        self.bounds.rescale(self.octave_sum(lift(coord)))
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }
}

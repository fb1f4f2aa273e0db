//! Fractal Perlin noise.

use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

use super::{lift, require_2d_or_3d, Bounds, GeneratorFunction};
use crate::error::{Error, Result};
use crate::params::PerlinParams;

/// Octave-summed Perlin noise rescaled into the bounds.
///
/// 2D textures sample the `z = 0` plane of the 3D field.
pub struct PerlinNoise<const D: usize> {
    module: Fbm<Perlin>,
    bounds: Bounds,
}

impl<const D: usize> PerlinNoise<D> {
    pub fn new(params: &PerlinParams, bounds: Bounds) -> Result<Self> {
        require_2d_or_3d("perlin", D)?;
        if params.octaves == 0 || params.octaves > Fbm::<Perlin>::MAX_OCTAVES {
            return Err(Error::invalid(
                "octaves",
                format!(
                    "must be within 1..={}, got {}",
                    Fbm::<Perlin>::MAX_OCTAVES,
                    params.octaves
                ),
            ));
        }
        if !params.frequency.is_finite() || !params.persistence.is_finite() {
            return Err(Error::invalid(
                "frequency/persistence",
                "must be finite",
            ));
        }

        let module = Fbm::<Perlin>::new(0)
            .set_octaves(params.octaves)
            .set_frequency(params.frequency)
            .set_persistence(params.persistence);

        Ok(Self { module, bounds })
    }
}

impl<const D: usize> GeneratorFunction<D> for PerlinNoise<D> {
    fn sample(&mut self, coord: &[f32; D]) -> f32 {
        self.bounds.rescale(self.module.get(lift(coord)))
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_1d() {
        let result = PerlinNoise::<1>::new(&PerlinParams::default(), Bounds::default());
        assert!(matches!(
            result,
            Err(Error::UnsupportedDimension {
                kind: "perlin",
                dimension: 1
            })
        ));
    }

    #[test]
    fn test_rejects_zero_octaves() {
        let params = PerlinParams {
            octaves: 0,
            ..PerlinParams::default()
        };
        assert!(PerlinNoise::<2>::new(&params, Bounds::default()).is_err());
    }

    #[test]
    fn test_deterministic_and_bounded() {
        let bounds = Bounds::new(10.0, 20.0).unwrap();
        let mut a = PerlinNoise::<3>::new(&PerlinParams::default(), bounds).unwrap();
        let mut b = PerlinNoise::<3>::new(&PerlinParams::default(), bounds).unwrap();

        for i in 0..64 {
            let t = i as f32 / 63.0;
            let coord = [t, 1.0 - t, t * 0.5 + 1.0];
            let value = a.sample(&coord);
            assert!(bounds.contains(value), "{} outside bounds", value);
            assert_eq!(value, b.sample(&coord));
        }
    }

    #[test]
    fn test_2d_matches_z0_plane() {
        let params = PerlinParams::default();
        let mut flat = PerlinNoise::<2>::new(&params, Bounds::default()).unwrap();
        let mut solid = PerlinNoise::<3>::new(&params, Bounds::default()).unwrap();

        assert_eq!(flat.sample(&[0.3, 0.7]), solid.sample(&[0.3, 0.7, 0.0]));
    }
}
